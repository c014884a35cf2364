use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::identifier::ExtensionId;

/// A bookmarked marketplace extension plus the user's annotations.
///
/// `category` and `tags` refer to registry entries by name. Tags are kept
/// in a set, so a tag can never be attached twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: ExtensionId,
    pub display_name: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub category: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub date_added: i64,
    pub download_count: String,
    pub rating: String,
    pub last_update: i64,
    #[serde(default)]
    pub note: Option<String>,
}

impl Bookmark {
    /// Builds a fresh bookmark with no tags and no note.
    pub fn new(id: ExtensionId, category: &str, metadata: ResolvedMetadata, date_added: i64) -> Self {
        Self {
            id,
            display_name: metadata.display_name,
            icon: metadata.icon,
            category: category.to_string(),
            tags: BTreeSet::new(),
            date_added,
            download_count: metadata.download_count,
            rating: metadata.rating,
            last_update: metadata.last_update,
            note: None,
        }
    }
}

/// Descriptive metadata fetched once from the marketplace when a bookmark is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMetadata {
    pub display_name: String,
    pub icon: Option<String>,
    /// Install count, already formatted for display (e.g. `1,000,000`).
    pub download_count: String,
    /// Average rating, formatted with one decimal (e.g. `4.5`).
    pub rating: String,
    /// Last marketplace update as a UNIX timestamp in seconds.
    pub last_update: i64,
}
