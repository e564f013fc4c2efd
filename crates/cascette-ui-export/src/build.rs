//! Build resolution from the version service

use cascette_formats::bpsv::{BpsvDocument, BpsvRow, BpsvSchema, BpsvValue};
use cascette_protocol::{Product, ProtocolError, Region, VersionsClient};
use tracing::{debug, info};

use crate::error::{ExportError, Result};

/// Build and CDN coordinates of the current build in one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDescriptor {
    /// Region the row was selected for
    pub region: Region,
    /// Build configuration key
    pub build_config: String,
    /// CDN configuration key
    pub cdn_config: String,
    /// Keyring key, empty for most products
    pub keyring: Option<String>,
    /// Numeric build id
    pub build_number: u32,
    /// Human-readable version, e.g. `11.1.5.61559`
    pub version: String,
    /// Product configuration key
    pub product_config: String,
}

impl BuildDescriptor {
    /// Select the first row matching `region` from a versions table.
    ///
    /// Columns are looked up by name, so column order and header casing do
    /// not matter.
    pub fn from_versions(document: &BpsvDocument, region: Region) -> Result<Self> {
        let row = document
            .find_row("Region", region.as_str())
            .ok_or(ExportError::RegionNotFound {
                region,
                rows: document.row_count(),
            })?;
        let schema = document.schema();

        // Only the selected row is typed
        let values = row.values(schema).map_err(|e| {
            ExportError::versions(ProtocolError::Parse(format!(
                "versions row for {region}: {e}"
            )))
        })?;

        let build_number = ["BuildId", "Build"]
            .iter()
            .find_map(|name| schema.get_field_index(name))
            .and_then(|index| values.get(index))
            .and_then(BpsvValue::as_dec)
            .ok_or_else(|| {
                ExportError::versions(ProtocolError::Parse(
                    "versions row has no BuildId value".to_string(),
                ))
            })?;
        let build_number = u32::try_from(build_number).map_err(|_| {
            ExportError::versions(ProtocolError::Parse(format!(
                "invalid build number: {build_number}"
            )))
        })?;

        Ok(Self {
            region,
            build_config: required(row, schema, &["BuildConfig"])?.to_string(),
            cdn_config: required(row, schema, &["CDNConfig"])?.to_string(),
            keyring: optional(row, schema, &["KeyRing"]).map(str::to_string),
            build_number,
            version: required(row, schema, &["VersionsName", "Version"])?.to_string(),
            product_config: optional(row, schema, &["ProductConfig"])
                .unwrap_or_default()
                .to_string(),
        })
    }
}

/// First non-empty value among alternative column names
fn optional<'a>(row: &'a BpsvRow, schema: &BpsvSchema, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .find_map(|name| row.get_raw_by_name(name, schema))
        .filter(|value| !value.is_empty())
}

fn required<'a>(row: &'a BpsvRow, schema: &BpsvSchema, names: &[&str]) -> Result<&'a str> {
    optional(row, schema, names).ok_or_else(|| {
        ExportError::versions(ProtocolError::Parse(format!(
            "versions row has no {} value",
            names[0]
        )))
    })
}

/// Resolves the current build of a product.
pub struct BuildResolver {
    client: VersionsClient,
}

impl BuildResolver {
    /// Create a resolver over a versions client
    pub fn new(client: VersionsClient) -> Self {
        Self { client }
    }

    /// Fetch the versions table and select the row for `region`.
    ///
    /// A single request is made; any failure is returned as-is.
    pub async fn resolve(&self, product: Product, region: Region) -> Result<BuildDescriptor> {
        debug!("Querying {} versions from {}", product, self.client.base_url());
        let document = self
            .client
            .versions(product)
            .await
            .map_err(ExportError::versions)?;

        let build = BuildDescriptor::from_versions(&document, region)?;
        info!(
            "Resolved {} {} build {} (build config {}, CDN config {})",
            product, region, build.version, build.build_config, build.cdn_config
        );
        Ok(build)
    }
}
