use serde::{Deserialize, Serialize};

use super::collection::SortOrder;

/// Top-level settings container, persisted as `settings.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BookmarkerSettings {
    pub general: GeneralSettings,
    pub marketplace: MarketplaceSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettings {
    /// Overrides the SQLite file location; the platform data dir is used when unset.
    pub database_path: Option<String>,
    /// Sort order applied to a collection that has never stored one.
    pub default_sort_order: SortOrder,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            database_path: None,
            default_sort_order: SortOrder::AToZ,
        }
    }
}

/// Marketplace gallery endpoint used to resolve extension metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketplaceSettings {
    pub endpoint: String,
    pub api_version: String,
    /// Gallery query flags bitmask.
    pub flags: u32,
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    format!("extbookmarks/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for MarketplaceSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://marketplace.visualstudio.com/_apis/public/gallery/extensionquery"
                .to_string(),
            api_version: "3.0-preview.1".to_string(),
            flags: 914,
            timeout_secs: 15,
            user_agent: default_user_agent(),
        }
    }
}

/// Logging settings. `RUST_LOG` takes precedence when set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
