use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::bookmark::Bookmark;
use super::identifier::ExtensionId;

/// The pinned fallback category. Always present, never renamed or removed.
pub const DEFAULT_CATEGORY: &str = "Default";

/// Default ordering applied when listing bookmarks within a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "AZ")]
    AToZ,
    #[serde(rename = "ZA")]
    ZToA,
    NewestFirst,
    OldestFirst,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::AToZ => "AZ",
            SortOrder::ZToA => "ZA",
            SortOrder::NewestFirst => "NewestFirst",
            SortOrder::OldestFirst => "OldestFirst",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AZ" => Ok(SortOrder::AToZ),
            "ZA" => Ok(SortOrder::ZToA),
            "NewestFirst" => Ok(SortOrder::NewestFirst),
            "OldestFirst" => Ok(SortOrder::OldestFirst),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

/// The entire persisted state: categories, bookmarks, tags and the sort order.
///
/// Registries and the bookmark store borrow this aggregate mutably; there is
/// no other shared state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub categories: Vec<String>,
    pub bookmarks: Vec<Bookmark>,
    pub tags: Vec<String>,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl Default for Collection {
    fn default() -> Self {
        Self {
            categories: vec![DEFAULT_CATEGORY.to_string()],
            bookmarks: Vec::new(),
            tags: Vec::new(),
            sort_order: SortOrder::default(),
        }
    }
}

impl Collection {
    /// Restores the load-time guarantees: `"Default"` exists (inserted first
    /// when missing) and registry names are unique.
    pub fn normalize(&mut self) {
        dedup_in_place(&mut self.categories);
        dedup_in_place(&mut self.tags);
        if !self.has_category(DEFAULT_CATEGORY) {
            self.categories.insert(0, DEFAULT_CATEGORY.to_string());
        }
    }

    /// Case-sensitive category lookup.
    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }

    /// Case-insensitive tag lookup. Imported tags keep their original case.
    pub fn tag_position(&self, name: &str) -> Option<usize> {
        self.tags.iter().position(|t| same_tag(t, name))
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tag_position(name).is_some()
    }

    pub fn find_bookmark(&self, id: &ExtensionId) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == *id)
    }

    pub fn find_bookmark_mut(&mut self, id: &ExtensionId) -> Option<&mut Bookmark> {
        self.bookmarks.iter_mut().find(|b| b.id == *id)
    }

    pub fn contains_bookmark(&self, id: &ExtensionId) -> bool {
        self.find_bookmark(id).is_some()
    }

    /// True when nothing beyond the initial state has been recorded.
    pub fn is_pristine(&self) -> bool {
        self.bookmarks.is_empty()
            && self.tags.is_empty()
            && self.categories.len() == 1
            && self.categories[0] == DEFAULT_CATEGORY
    }
}

fn dedup_in_place(names: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    names.retain(|n| seen.insert(n.clone()));
}

/// Tag names compare case-insensitively, ignoring surrounding whitespace.
pub fn same_tag(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
