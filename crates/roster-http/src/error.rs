use thiserror::Error;

use crate::kind::HttpErrorKind;

/// A response arrived but its status says the request failed.
///
/// The status is classified into an [`HttpErrorKind`] at construction so
/// callers can branch on severity without re-parsing the code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (HTTP {status})")]
pub struct HttpError {
    kind: Option<HttpErrorKind>,
    status: u16,
    message: String,
    url: Option<String>,
}

impl HttpError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: HttpErrorKind::from_status(status),
            status,
            message: message.into(),
            url: None,
        }
    }

    /// Record the URL the failing response came from.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Build from a received response. The body is left unread.
    #[cfg(feature = "reqwest")]
    pub fn from_response(response: &reqwest::Response, message: impl Into<String>) -> Self {
        Self::new(response.status().as_u16(), message).with_url(response.url().as_str())
    }

    /// Status band, or `None` when the code is outside `100..=599`.
    pub fn kind(&self) -> Option<HttpErrorKind> {
        self.kind
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_client(&self) -> bool {
        self.kind == Some(HttpErrorKind::Client)
    }

    pub fn is_server(&self) -> bool {
        self.kind == Some(HttpErrorKind::Server)
    }
}
