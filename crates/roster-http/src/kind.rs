use std::fmt;

/// Status band of an HTTP response.
///
/// The discriminant is the lowest status code in the band, so
/// `HttpErrorKind::Client as u16 == 400`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum HttpErrorKind {
    /// 1xx
    Information = 100,
    /// 2xx
    Success = 200,
    /// 3xx
    Redirect = 300,
    /// 4xx
    Client = 400,
    /// 5xx
    Server = 500,
}

impl HttpErrorKind {
    /// Classify a numeric status by its hundreds digit.
    ///
    /// Returns `None` for codes outside `100..=599`.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_http::HttpErrorKind;
    ///
    /// assert_eq!(HttpErrorKind::from_status(404), Some(HttpErrorKind::Client));
    /// assert_eq!(HttpErrorKind::from_status(503), Some(HttpErrorKind::Server));
    /// assert_eq!(HttpErrorKind::from_status(99), None);
    /// ```
    pub fn from_status(status: u16) -> Option<Self> {
        match status / 100 {
            1 => Some(HttpErrorKind::Information),
            2 => Some(HttpErrorKind::Success),
            3 => Some(HttpErrorKind::Redirect),
            4 => Some(HttpErrorKind::Client),
            5 => Some(HttpErrorKind::Server),
            _ => None,
        }
    }

    /// Lowest status code of the band.
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// `true` for the 4xx and 5xx bands.
    pub fn is_failure(self) -> bool {
        matches!(self, HttpErrorKind::Client | HttpErrorKind::Server)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpErrorKind::Information => "information",
            HttpErrorKind::Success => "success",
            HttpErrorKind::Redirect => "redirect",
            HttpErrorKind::Client => "client",
            HttpErrorKind::Server => "server",
        }
    }
}

impl fmt::Display for HttpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
