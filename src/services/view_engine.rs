//! View Engine.
//!
//! Read-only projections of a [`Collection`] for presentation: ordered
//! category listings, bookmarks per category under the current sort order,
//! search, tag filtering and the textual details view. Nothing here
//! mutates the collection.

use chrono::{DateTime, Utc};
use log::debug;

use crate::managers::category_registry::CategoryRegistry;
use crate::managers::tag_registry::TagRegistry;
use crate::types::bookmark::Bookmark;
use crate::types::collection::{same_tag, Collection, SortOrder};
use crate::types::errors::ViewError;

/// Trait defining the view derivations.
pub trait ViewEngineTrait {
    fn list_categories(&self) -> Vec<String>;
    fn list_tags(&self) -> Vec<String>;
    fn list_bookmarks(&self, category: &str) -> Vec<&Bookmark>;
    fn search(&self, term: &str) -> Vec<&Bookmark>;
    fn filter_by_tag(&self, tag: &str) -> Result<Vec<&Bookmark>, ViewError>;
}

/// Category name with the number of bookmarks it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub name: String,
    pub count: usize,
}

/// View engine over a shared borrow of a collection.
pub struct ViewEngine<'a> {
    collection: &'a Collection,
}

impl<'a> ViewEngine<'a> {
    pub fn new(collection: &'a Collection) -> Self {
        Self { collection }
    }

    /// Sorts in place. The sort is stable, so equal keys keep insertion order.
    pub fn sort_bookmarks(bookmarks: &mut [&Bookmark], order: SortOrder) {
        match order {
            SortOrder::AToZ => bookmarks.sort_by(|a, b| a.display_name.cmp(&b.display_name)),
            SortOrder::ZToA => bookmarks.sort_by(|a, b| b.display_name.cmp(&a.display_name)),
            SortOrder::NewestFirst => bookmarks.sort_by(|a, b| b.date_added.cmp(&a.date_added)),
            SortOrder::OldestFirst => bookmarks.sort_by(|a, b| a.date_added.cmp(&b.date_added)),
        }
    }

    /// Every bookmark regardless of category, under the current sort order.
    pub fn list_all(&self) -> Vec<&'a Bookmark> {
        let mut all: Vec<&Bookmark> = self.collection.bookmarks.iter().collect();
        Self::sort_bookmarks(&mut all, self.collection.sort_order);
        all
    }

    /// Categories in listing order, each with its bookmark count.
    pub fn category_summary(&self) -> Vec<CategorySummary> {
        self.list_categories()
            .into_iter()
            .map(|name| {
                let count = self
                    .collection
                    .bookmarks
                    .iter()
                    .filter(|b| b.category == name)
                    .count();
                CategorySummary { name, count }
            })
            .collect()
    }

    /// Deterministic multi-line summary of a bookmark.
    ///
    /// Field order is fixed; `Tags` and `Note` lines are omitted when empty.
    pub fn render_details(bookmark: &Bookmark) -> String {
        let mut lines = vec![
            format!("ID: {}", bookmark.id),
            format!("Name: {}", bookmark.display_name),
            format!("Category: {}", bookmark.category),
        ];
        if !bookmark.tags.is_empty() {
            let tags: Vec<&str> = bookmark.tags.iter().map(String::as_str).collect();
            lines.push(format!("Tags: {}", tags.join(", ")));
        }
        lines.push(format!("Date Added: {}", format_timestamp(bookmark.date_added)));
        lines.push(format!("Downloads: {}", bookmark.download_count));
        lines.push(format!("Rating: {}", bookmark.rating));
        lines.push(format!("Last Update: {}", format_timestamp(bookmark.last_update)));
        if let Some(note) = &bookmark.note {
            lines.push(format!("Note: {}", note));
        }
        lines.join("\n")
    }
}

impl<'a> ViewEngineTrait for ViewEngine<'a> {
    fn list_categories(&self) -> Vec<String> {
        CategoryRegistry::ordered(&self.collection.categories)
    }

    fn list_tags(&self) -> Vec<String> {
        TagRegistry::ordered(&self.collection.tags)
    }

    fn list_bookmarks(&self, category: &str) -> Vec<&Bookmark> {
        let mut listed: Vec<&Bookmark> = self
            .collection
            .bookmarks
            .iter()
            .filter(|b| b.category == category)
            .collect();
        Self::sort_bookmarks(&mut listed, self.collection.sort_order);
        debug!(
            "listed {} bookmark(s) in '{}' by {}",
            listed.len(),
            category,
            self.collection.sort_order
        );
        listed
    }

    /// Case-insensitive substring match on the display name, ordered A–Z.
    fn search(&self, term: &str) -> Vec<&Bookmark> {
        let needle = term.to_lowercase();
        let mut found: Vec<&Bookmark> = self
            .collection
            .bookmarks
            .iter()
            .filter(|b| b.display_name.to_lowercase().contains(&needle))
            .collect();
        Self::sort_bookmarks(&mut found, SortOrder::AToZ);
        found
    }

    /// Bookmarks carrying `tag`, ordered A–Z.
    ///
    /// An empty registry is an error rather than an empty result, so callers
    /// can tell "nothing to filter by" from "no matches".
    fn filter_by_tag(&self, tag: &str) -> Result<Vec<&Bookmark>, ViewError> {
        if self.collection.tags.is_empty() {
            return Err(ViewError::NoTagsAvailable);
        }
        let mut tagged: Vec<&Bookmark> = self
            .collection
            .bookmarks
            .iter()
            .filter(|b| b.tags.iter().any(|t| same_tag(t, tag)))
            .collect();
        Self::sort_bookmarks(&mut tagged, SortOrder::AToZ);
        Ok(tagged)
    }
}

fn format_timestamp(secs: i64) -> String {
    match DateTime::<Utc>::from_timestamp(secs, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => secs.to_string(),
    }
}
