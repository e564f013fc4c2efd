//! Community listfile snapshot download
//!
//! The snapshot is published as a release asset of `wowdev/wow-listfile`.
//! It is fetched fresh on every call; nothing is cached. The snapshot runs to
//! tens of megabytes, so downloads are not bounded by a whole-request
//! timeout.

use reqwest::Client;

use crate::error::{ProtocolError, Result};
use crate::transport::{HttpConfig, build_client, get_text};

/// Latest published community listfile
pub const COMMUNITY_LISTFILE_URL: &str =
    "https://github.com/wowdev/wow-listfile/releases/latest/download/community-listfile.csv";

/// Downloads listfile snapshots
pub struct ListfileClient {
    client: Client,
}

impl ListfileClient {
    /// Create a client. The request timeout of `config` is not applied; its
    /// connection timeout is.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let config = HttpConfig {
            timeout: None,
            ..config.clone()
        };

        Ok(Self {
            client: build_client(&config)?,
        })
    }

    /// Download the snapshot at `url` as text
    pub async fn fetch(&self, url: &str) -> Result<String> {
        url::Url::parse(url)
            .map_err(|e| ProtocolError::InvalidEndpoint(format!("{url}: {e}")))?;

        let body = get_text(&self.client, url).await?;
        tracing::debug!("listfile snapshot: {} bytes", body.len());
        Ok(body)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::client::{Product, VersionsClient};
    use reqwest::StatusCode;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_snapshot() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/community-listfile.csv"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("1;interface/a.lua\n2;world/b.m2\n"),
            )
            .mount(&mock_server)
            .await;

        let client = ListfileClient::new(&HttpConfig::default()).expect("Operation should succeed");
        let body = client
            .fetch(&format!("{}/community-listfile.csv", mock_server.uri()))
            .await
            .expect("Operation should succeed");

        assert_eq!(body.lines().count(), 2);
    }

    #[tokio::test]
    async fn test_fetch_outlasts_request_timeout() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/community-listfile.csv"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("1;interface/a.lua\n")
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/wow/versions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("Region!STRING:0\nus\n")
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let config = HttpConfig {
            timeout: Some(Duration::from_millis(100)),
            ..HttpConfig::default()
        };

        // The same configuration times out a versions request
        let versions = VersionsClient::new(mock_server.uri(), &config)
            .expect("Operation should succeed");
        assert!(matches!(
            versions.versions(Product::Wow).await,
            Err(ProtocolError::Http(_))
        ));

        let client = ListfileClient::new(&config).expect("Operation should succeed");
        let body = client
            .fetch(&format!("{}/community-listfile.csv", mock_server.uri()))
            .await
            .expect("Operation should succeed");
        assert_eq!(body, "1;interface/a.lua\n");
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = ListfileClient::new(&HttpConfig::default()).expect("Operation should succeed");
        let result = client
            .fetch(&format!("{}/missing.csv", mock_server.uri()))
            .await;

        assert!(matches!(
            result,
            Err(ProtocolError::HttpStatus(StatusCode::NOT_FOUND))
        ));
    }

    #[tokio::test]
    async fn test_fetch_rejects_invalid_url() {
        let client = ListfileClient::new(&HttpConfig::default()).expect("Operation should succeed");
        let result = client.fetch("::not-a-url").await;
        assert!(matches!(result, Err(ProtocolError::InvalidEndpoint(_))));
    }
}
