use std::time::Duration;

#[cfg(feature = "reqwest")]
use reqwest::Proxy;
#[cfg(feature = "reqwest")]
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::ConfigError;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Environment variable overriding [`ClientConfig::base_url`].
pub const ENV_BASE_URL: &str = "ROSTER_API_URL";

/// Environment variable overriding [`ClientConfig::timeout`], in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "ROSTER_API_TIMEOUT_SECS";

/// Settings for reaching the teams API.
///
/// Plain data; nothing is validated until a client is built from it.
///
/// # Examples
///
/// ```
/// use roster_teams::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .base_url("https://teams.example.com/api")
///     .timeout(Duration::from_secs(5))
///     .header("Authorization", "Bearer token");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root of the API; `teams` is appended to it.
    ///
    /// Default: `http://localhost:3000/api`
    pub base_url: String,

    /// Whole-request timeout. `None` leaves the HTTP client's default.
    ///
    /// Default: None
    pub timeout: Option<Duration>,

    /// Headers sent with every request.
    ///
    /// Default: empty
    pub headers: Vec<(String, String)>,

    /// Proxies; `https` ones are used for secure targets, the rest for plain HTTP.
    ///
    /// Default: None
    pub proxies: Option<Vec<String>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            headers: Vec::new(),
            proxies: None,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `ROSTER_API_URL` and `ROSTER_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|source| ConfigError::InvalidTimeout { value: raw.clone(), source })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.proxies.get_or_insert_with(Vec::new).push(url.into());
        self
    }
}

#[cfg(feature = "reqwest")]
impl ClientConfig {
    /// Build the `reqwest` client these settings describe.
    ///
    /// The base URL is not looked at here; it is checked when a
    /// [`TeamsClient`](crate::TeamsClient) is created.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidHeader`], [`ConfigError::Proxy`] or
    /// [`ConfigError::Build`].
    pub fn build_client(&self) -> Result<reqwest::Client, ConfigError> {
        let mut builder = reqwest::Client::builder().default_headers(header_map(&self.headers)?);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(proxies) = &self.proxies {
            let (secure, insecure): (Vec<&String>, Vec<&String>) =
                proxies.iter().partition(|u| u.starts_with("https://"));

            for url in secure {
                builder = builder.proxy(Proxy::https(url.as_str()).map_err(|source| {
                    ConfigError::Proxy {
                        url: url.clone(),
                        source,
                    }
                })?);
            }

            for url in insecure {
                builder = builder.proxy(Proxy::http(url.as_str()).map_err(|source| {
                    ConfigError::Proxy {
                        url: url.clone(),
                        source,
                    }
                })?);
            }
        }

        builder.build().map_err(ConfigError::Build)
    }
}

#[cfg(feature = "reqwest")]
fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, ConfigError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let invalid = || ConfigError::InvalidHeader { name: name.clone() };
        let key = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        map.append(key, value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_points_at_localhost() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.timeout.is_none());
        assert!(config.headers.is_empty());
        assert!(config.proxies.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, " https://teams.example.com/api "),
            (ENV_TIMEOUT_SECS, "7"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://teams.example.com/api");
        assert_eq!(config.timeout, Some(Duration::from_secs(7)));
    }

    #[test]
    fn test_blank_env_url_is_ignored() {
        let config = ClientConfig::from_lookup(lookup(&[(ENV_BASE_URL, "  ")])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_bad_timeout_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { ref value, .. } if value == "soon"));
    }

    #[test]
    fn test_builder_accumulates() {
        let config = ClientConfig::default()
            .header("X-Team", "li")
            .header("Accept", "application/json")
            .proxy("http://proxy.local:8080")
            .proxy("https://secure-proxy.local:8443");

        assert_eq!(config.headers.len(), 2);
        assert_eq!(config.proxies.as_ref().map(Vec::len), Some(2));
    }

    #[cfg(feature = "reqwest")]
    #[test]
    fn test_build_client() {
        let config = ClientConfig::default()
            .timeout(Duration::from_secs(3))
            .header("Accept", "application/json")
            .proxy("http://proxy.local:8080")
            .proxy("https://secure-proxy.local:8443");
        assert!(config.build_client().is_ok());
    }

    #[cfg(feature = "reqwest")]
    #[test]
    fn test_build_client_rejects_bad_header() {
        let err = ClientConfig::default()
            .header("bad header", "x")
            .build_client()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHeader { ref name } if name == "bad header"));
    }

    #[cfg(feature = "reqwest")]
    #[test]
    fn test_build_client_rejects_bad_proxy() {
        let err = ClientConfig::default()
            .proxy("http://[::1")
            .build_client()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Proxy { ref url, .. } if url == "http://[::1"));
    }

    #[cfg(feature = "reqwest")]
    #[test]
    fn test_header_map_keeps_duplicates() {
        let map = header_map(&[
            ("Accept".to_string(), "application/json".to_string()),
            ("X-Tag".to_string(), "a".to_string()),
            ("X-Tag".to_string(), "b".to_string()),
        ])
        .unwrap();
        assert_eq!(map.get_all("x-tag").iter().count(), 2);
    }
}
