use reqwest::Client;
use roster_http::HttpError;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::core::{assert_is_typed_array, endpoint, parse_base_url, validate_team};
use crate::data::{ClientConfig, Team};
use crate::effects::TeamSource;
use crate::error::{Error, Result};

/// Message attached to every [`HttpError`] raised by this client.
pub const API_ERROR_MESSAGE: &str = "Problem fetching data from API";

/// Teams API client backed by `reqwest`.
///
/// Every response is validated before it is returned; nothing is cached and
/// failed requests are not retried.
#[derive(Debug, Clone)]
pub struct TeamsClient {
    client: Client,
    base_url: Url,
}

impl TeamsClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let client = config.build_client()?;
        Ok(Self { client, base_url })
    }

    /// Client configured from `ROSTER_API_URL` / `ROSTER_API_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get_json(&self, segments: &[&str]) -> Result<Value> {
        let url = endpoint(&self.base_url, segments);
        debug!(%url, "requesting");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = response.status();
        if !status.is_success() {
            debug!(%url, status = status.as_u16(), "request failed");
            return Err(HttpError::from_response(&response, API_ERROR_MESSAGE).into());
        }

        let body = response.bytes().await.map_err(Error::Transport)?;
        serde_json::from_slice(&body).map_err(Error::Decode)
    }
}

impl TeamSource for TeamsClient {
    async fn get_all_teams(&self) -> Result<Vec<Team>> {
        let value = self.get_json(&["teams"]).await?;
        let teams = assert_is_typed_array(&value, validate_team).inspect_err(|e| {
            warn!(error = %e, "teams response failed validation");
        })?;
        debug!(count = teams.len(), "fetched teams");
        Ok(teams)
    }

    async fn get_team_by_id(&self, id: &str) -> Result<Team> {
        let value = self.get_json(&["teams", id]).await?;
        let team = validate_team(&value).inspect_err(|e| {
            warn!(id, error = %e, "team response failed validation");
        })?;
        Ok(team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_new_with_defaults() {
        let client = TeamsClient::new(ClientConfig::default()).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:3000/api");
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let err = TeamsClient::new(ClientConfig::default().base_url("::nope")).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_rejects_bad_header() {
        let err = TeamsClient::new(ClientConfig::default().header("bad header", "x")).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidHeader { ref name }) if name == "bad header"
        ));
    }
}
