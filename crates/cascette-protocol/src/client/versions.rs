//! TACT version service client

use cascette_formats::bpsv::{self, BpsvDocument};
use reqwest::Client;

use super::{Product, Region};
use crate::error::{ProtocolError, Result};
use crate::transport::{HttpConfig, build_client, get_text};

/// Client for `GET {base}/{product}/versions`
pub struct VersionsClient {
    client: Client,
    base_url: String,
}

impl VersionsClient {
    /// Create a client against an explicit base URL
    pub fn new(base_url: impl Into<String>, config: &HttpConfig) -> Result<Self> {
        let base_url = base_url.into();
        url::Url::parse(&base_url)
            .map_err(|e| ProtocolError::InvalidEndpoint(format!("{base_url}: {e}")))?;

        Ok(Self {
            client: build_client(config)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client for a region's TACT HTTPS host
    pub fn for_region(region: Region, config: &HttpConfig) -> Result<Self> {
        Self::new(region.tact_https_url(), config)
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch and parse the versions table of a product.
    ///
    /// The response lists every region; selecting one is up to the caller.
    pub async fn versions(&self, product: Product) -> Result<BpsvDocument> {
        let url = format!("{}/{}/versions", self.base_url, product.code());
        let body = get_text(&self.client, &url).await?;

        let document = bpsv::parse(&body)
            .map_err(|e| ProtocolError::Parse(format!("BPSV parse error: {e}")))?;
        tracing::debug!(
            "{} versions: {} rows, seqn {:?}",
            product,
            document.row_count(),
            document.sequence_number()
        );

        Ok(document)
    }
}
