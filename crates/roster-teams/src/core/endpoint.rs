use url::Url;

use crate::error::ConfigError;

/// Parse and check an API base URL.
///
/// Only `http` and `https` bases are accepted, since request paths are
/// appended to them.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedBaseUrl {
            url: raw.to_string(),
        });
    }

    Ok(url)
}

/// Append path segments to `base`, percent-encoding each one.
///
/// A trailing slash on `base` is not doubled.
pub fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}
