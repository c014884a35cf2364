use serde::{Deserialize, Serialize};

use super::bookmark::Bookmark;

/// Portable export/import form of a collection.
///
/// The sort order is a local preference and is not part of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub categories: Vec<String>,
    pub bookmarks: Vec<Bookmark>,
    pub tags: Vec<String>,
}
