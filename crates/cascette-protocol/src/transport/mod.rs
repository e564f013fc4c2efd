//! Shared HTTP transport
//!
//! Every client in this crate builds its `reqwest::Client` through
//! [`build_client`], so TLS provider setup and timeouts live in one place.

use crate::error::Result;
use reqwest::{Client, ClientBuilder};
use std::sync::Once;
use std::time::Duration;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

static CRYPTO_PROVIDER: Once = Once::new();

/// Install the ring crypto provider for rustls.
///
/// reqwest is built without a bundled provider, so one has to be installed
/// before the first client is created. Safe to call repeatedly.
pub fn ensure_crypto_provider() {
    CRYPTO_PROVIDER.call_once(|| {
        // Another component may already have installed one
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Whole-request timeout, covering the body download. `None` leaves only
    /// the connection timeout in effect.
    pub timeout: Option<Duration>,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum redirects to follow (the listfile release URL redirects)
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(120)),
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(30),
            max_redirects: 5,
        }
    }
}

/// Build a `reqwest` client from configuration
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    ensure_crypto_provider();

    let mut builder = ClientBuilder::new();
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .connect_timeout(config.connect_timeout)
        .pool_idle_timeout(config.pool_idle_timeout)
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .user_agent(USER_AGENT)
        .build()
        .map_err(Into::into)
}

/// Fetch a URL and return the body as text, mapping non-200 statuses
pub(crate) async fn get_text(client: &Client, url: &str) -> Result<String> {
    tracing::debug!("GET {}", url);

    let response = client.get(url).send().await?;
    let status = response.status();
    if status != reqwest::StatusCode::OK {
        tracing::debug!("GET {} failed with {}", url, status);
        return Err(crate::error::ProtocolError::from_status(status));
    }

    Ok(response.text().await?)
}
