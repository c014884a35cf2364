//! Metadata Resolver.
//!
//! Looks up an extension on the marketplace gallery and condenses the reply
//! into [`ResolvedMetadata`]. "No such extension" is reported separately from
//! transport, status and decoding failures.

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use log::debug;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::types::bookmark::ResolvedMetadata;
use crate::types::errors::ResolveError;
use crate::types::identifier::ExtensionId;
use crate::types::settings::MarketplaceSettings;

const ICON_ASSET_TYPE: &str = "Microsoft.VisualStudio.Services.Icons.Default";
/// Gallery criterion type that matches on `publisher.name`.
const FILTER_BY_EXTENSION_NAME: u32 = 7;

/// Trait defining the metadata lookup collaborator.
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    async fn resolve(&self, id: &ExtensionId) -> Result<ResolvedMetadata, ResolveError>;
}

/// Resolver backed by the marketplace gallery `extensionquery` API.
pub struct MarketplaceResolver {
    client: reqwest::Client,
    settings: MarketplaceSettings,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<QueryResult>,
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    #[serde(default)]
    extensions: Vec<GalleryExtension>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GalleryExtension {
    display_name: String,
    #[serde(default)]
    last_updated: Option<String>,
    #[serde(default)]
    versions: Vec<GalleryVersion>,
    #[serde(default)]
    statistics: Vec<GalleryStatistic>,
}

#[derive(Debug, Deserialize)]
struct GalleryVersion {
    #[serde(default)]
    files: Vec<GalleryFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GalleryFile {
    asset_type: String,
    source: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GalleryStatistic {
    statistic_name: String,
    value: f64,
}

impl MarketplaceResolver {
    pub fn new(settings: MarketplaceSettings) -> Result<Self, ResolveError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| ResolveError::LookupFailed(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client, settings })
    }

    /// Request body for a single-extension gallery query.
    pub fn query_body(&self, id: &ExtensionId) -> Value {
        json!({
            "filters": [{
                "criteria": [
                    { "filterType": FILTER_BY_EXTENSION_NAME, "value": id.to_string() }
                ]
            }],
            "flags": self.settings.flags
        })
    }

    /// Condenses a gallery reply into metadata for `id`.
    pub fn parse_response(id: &ExtensionId, body: &[u8]) -> Result<ResolvedMetadata, ResolveError> {
        let response: QueryResponse = serde_json::from_slice(body)
            .map_err(|e| ResolveError::LookupFailed(format!("invalid gallery response: {}", e)))?;

        let extension = response
            .results
            .into_iter()
            .next()
            .and_then(|r| r.extensions.into_iter().next())
            .ok_or_else(|| ResolveError::NotFound(id.to_string()))?;

        let icon = extension
            .versions
            .first()
            .and_then(|v| v.files.iter().find(|f| f.asset_type == ICON_ASSET_TYPE))
            .map(|f| f.source.clone());

        let statistic = |name: &str| {
            extension
                .statistics
                .iter()
                .find(|s| s.statistic_name == name)
                .map(|s| s.value)
        };
        let installs = statistic("install").unwrap_or(0.0);
        let rating = statistic("averagerating").unwrap_or(0.0);

        let last_update = extension
            .last_updated
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.timestamp())
            .unwrap_or_default();

        Ok(ResolvedMetadata {
            display_name: extension.display_name,
            icon,
            download_count: format_count(installs.max(0.0).round() as u64),
            rating: format!("{:.1}", rating),
            last_update,
        })
    }
}

#[async_trait]
impl MetadataResolver for MarketplaceResolver {
    async fn resolve(&self, id: &ExtensionId) -> Result<ResolvedMetadata, ResolveError> {
        debug!("querying marketplace for {}", id);
        let response = self
            .client
            .post(&self.settings.endpoint)
            .header(
                reqwest::header::ACCEPT,
                format!("application/json;api-version={}", self.settings.api_version),
            )
            .json(&self.query_body(id))
            .send()
            .await
            .map_err(|e| ResolveError::LookupFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::LookupFailed(format!("marketplace returned HTTP {}", status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ResolveError::LookupFailed(e.to_string()))?;
        Self::parse_response(id, &body)
    }
}

/// Formats a count with comma thousands separators (`1234567` → `1,234,567`).
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
