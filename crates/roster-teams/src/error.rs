//! Error types for roster-teams.

use std::num::ParseIntError;

use roster_http::{HttpError, HttpErrorKind};
use thiserror::Error;

use crate::core::ValidationError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// No response was received.
    #[cfg(feature = "reqwest")]
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("response body is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("unexpected response shape: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Status band when the failure came from an HTTP response.
    pub fn http_kind(&self) -> Option<HttpErrorKind> {
        match self {
            Error::Http(e) => e.kind(),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid timeout {value:?}: {source}")]
    InvalidTimeout {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("base URL {url} must be an http(s) URL with a path")]
    UnsupportedBaseUrl { url: String },

    #[error("invalid header {name:?}")]
    InvalidHeader { name: String },

    #[cfg(feature = "reqwest")]
    #[error("invalid proxy URL {url}: {source}")]
    Proxy {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[cfg(feature = "reqwest")]
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}
