//! Collection Serializer.
//!
//! Converts a [`Collection`] to a portable [`Snapshot`] and merges a parsed
//! snapshot back in. Import never overwrites: registries take the union and
//! bookmarks already present by ID keep their existing record.

use std::collections::HashSet;

use log::{debug, warn};
use serde_json::{Map, Value};

use crate::types::bookmark::Bookmark;
use crate::types::collection::Collection;
use crate::types::errors::SnapshotError;
use crate::types::snapshot::Snapshot;

/// Counts of what a merge actually changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub categories_added: usize,
    pub tags_added: usize,
    pub bookmarks_added: usize,
    /// Imported bookmarks dropped because their ID was already present.
    pub bookmarks_skipped: usize,
}

impl MergeReport {
    pub fn is_empty(&self) -> bool {
        self.categories_added == 0 && self.tags_added == 0 && self.bookmarks_added == 0
    }
}

pub struct CollectionSerializer;

impl CollectionSerializer {
    /// Captures categories, bookmarks and tags verbatim.
    ///
    /// # Errors
    /// `SnapshotError::NothingToExport` when the collection is still in its
    /// initial state (only `"Default"`, no bookmarks, no tags).
    pub fn export(collection: &Collection) -> Result<Snapshot, SnapshotError> {
        if collection.is_pristine() {
            return Err(SnapshotError::NothingToExport);
        }
        Ok(Snapshot {
            categories: collection.categories.clone(),
            bookmarks: collection.bookmarks.clone(),
            tags: collection.tags.clone(),
        })
    }

    /// Validates the shape of a JSON value and decodes it into a snapshot.
    ///
    /// All of `categories`, `bookmarks` and `tags` must be present and be arrays.
    pub fn parse(value: &Value) -> Result<Snapshot, SnapshotError> {
        let object = value
            .as_object()
            .ok_or_else(|| SnapshotError::Malformed("expected a JSON object".to_string()))?;

        let categories = string_list(array_field(object, "categories")?, "categories")?;
        let tags = string_list(array_field(object, "tags")?, "tags")?;
        let bookmarks = array_field(object, "bookmarks")?
            .iter()
            .enumerate()
            .map(|(i, record)| {
                serde_json::from_value::<Bookmark>(record.clone()).map_err(|e| {
                    SnapshotError::Malformed(format!("bookmark #{}: {}", i, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Snapshot {
            categories,
            bookmarks,
            tags,
        })
    }

    pub fn from_json_bytes(bytes: &[u8]) -> Result<Snapshot, SnapshotError> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| SnapshotError::Malformed(format!("invalid JSON: {}", e)))?;
        Self::parse(&value)
    }

    pub fn to_json_bytes(snapshot: &Snapshot) -> Result<Vec<u8>, SnapshotError> {
        serde_json::to_vec_pretty(snapshot)
            .map_err(|e| SnapshotError::Malformed(format!("failed to encode snapshot: {}", e)))
    }

    /// Merges `snapshot` into `collection`.
    ///
    /// Categories and tags are unioned by exact string equality. Bookmarks
    /// whose ID is already present are dropped. Categories or tags referenced
    /// by an imported bookmark but missing from both registries are registered
    /// so the reference invariant keeps holding.
    pub fn merge(collection: &mut Collection, snapshot: Snapshot) -> MergeReport {
        let mut report = MergeReport::default();

        for category in snapshot.categories {
            if !collection.has_category(&category) {
                collection.categories.push(category);
                report.categories_added += 1;
            }
        }
        for tag in snapshot.tags {
            if !collection.tags.contains(&tag) {
                collection.tags.push(tag);
                report.tags_added += 1;
            }
        }

        let mut seen: HashSet<String> = collection.bookmarks.iter().map(|b| b.id.to_string()).collect();
        for bookmark in snapshot.bookmarks {
            if !seen.insert(bookmark.id.to_string()) {
                warn!("import: keeping existing bookmark {}", bookmark.id);
                report.bookmarks_skipped += 1;
                continue;
            }
            if !collection.has_category(&bookmark.category) {
                collection.categories.push(bookmark.category.clone());
                report.categories_added += 1;
            }
            for tag in &bookmark.tags {
                if !collection.tags.contains(tag) {
                    collection.tags.push(tag.clone());
                    report.tags_added += 1;
                }
            }
            collection.bookmarks.push(bookmark);
            report.bookmarks_added += 1;
        }

        debug!("import merge: {:?}", report);
        report
    }
}

fn array_field<'v>(object: &'v Map<String, Value>, name: &str) -> Result<&'v Vec<Value>, SnapshotError> {
    object
        .get(name)
        .ok_or_else(|| SnapshotError::Malformed(format!("missing '{}'", name)))?
        .as_array()
        .ok_or_else(|| SnapshotError::Malformed(format!("'{}' must be an array", name)))
}

fn string_list(values: &[Value], field: &str) -> Result<Vec<String>, SnapshotError> {
    values
        .iter()
        .map(|v| {
            v.as_str().map(str::to_string).ok_or_else(|| {
                SnapshotError::Malformed(format!("'{}' must contain only strings", field))
            })
        })
        .collect()
}
