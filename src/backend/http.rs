use async_trait::async_trait;
use tracing::debug;

use super::Backend;
use crate::core::ClientConfig;
use crate::error::ClientError;
use crate::zones::BackendPlayers;

/// `reqwest` implementation of [`Backend`].
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Backend at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Backend at the configured URL.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.backend_url.clone())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{path}", self.base_url)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn get_players(&self) -> Result<BackendPlayers, ClientError> {
        let url = self.endpoint("get");
        debug!(%url, "fetching backend players");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|err| ClientError::network("backend get request failed", err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::network_status(format!("backend get returned {status}")));
        }

        response
            .json::<BackendPlayers>()
            .await
            .map_err(|err| ClientError::network("backend get decode failed", err))
    }

    async fn post_players(&self, players: &BackendPlayers) -> Result<(), ClientError> {
        let url = self.endpoint("post");
        debug!(%url, "posting backend players");

        let response = self
            .client
            .post(&url)
            .json(players)
            .send()
            .await
            .map_err(|err| ClientError::network("backend post request failed", err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::network_status(format!("backend post returned {status}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let backend = HttpBackend::from_config(&ClientConfig::default());
        assert_eq!(backend.endpoint("get"), "http://localhost:5002/api/get");
        assert_eq!(backend.endpoint("post"), "http://localhost:5002/api/post");
    }

    #[tokio::test]
    async fn test_malformed_backend_url_is_network_error() {
        // Fails while building the request, before any connection attempt.
        let backend = HttpBackend::new("not a url");
        let err = backend.get_players().await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Network);

        let err = backend.post_players(&BackendPlayers::default()).await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Network);
    }
}
