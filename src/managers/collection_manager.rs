//! Collection Manager.
//!
//! Owns the persistence collaborator and the last committed [`Collection`].
//! Every mutation runs as one unit: reload the latest stored collection,
//! apply the operation (cascades included) to that working copy, save it,
//! and only then publish it. A failed operation saves nothing; a failed
//! save publishes nothing.

use std::path::Path;

use log::{info, warn};
use serde_json::Value;

use crate::database::collection_store::CollectionStore;
use crate::managers::bookmark_store::{BookmarkStore, BookmarkStoreTrait};
use crate::managers::category_registry::{CategoryRegistry, CategoryRegistryTrait};
use crate::managers::tag_registry::{TagRegistry, TagRegistryTrait};
use crate::services::collection_serializer::{CollectionSerializer, MergeReport};
use crate::services::file_transfer::FileTransfer;
use crate::services::view_engine::ViewEngine;
use crate::types::bookmark::{Bookmark, ResolvedMetadata};
use crate::types::collection::{Collection, SortOrder};
use crate::types::errors::{BookmarkError, CategoryError, PersistError, SnapshotError, TagError};
use crate::types::identifier::ExtensionId;
use crate::types::snapshot::Snapshot;

/// Transactional facade over the bookmark store, both registries and the serializer.
pub struct CollectionManager {
    store: Box<dyn CollectionStore>,
    collection: Collection,
}

impl CollectionManager {
    /// Loads the stored collection and wraps the store.
    pub fn open(store: Box<dyn CollectionStore>) -> Result<Self, PersistError> {
        let collection = store.load_collection()?;
        info!(
            "collection loaded: {} categories, {} bookmarks, {} tags",
            collection.categories.len(),
            collection.bookmarks.len(),
            collection.tags.len()
        );
        Ok(Self { store, collection })
    }

    /// The last committed collection.
    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Read-only projections over the last committed collection.
    pub fn view(&self) -> ViewEngine<'_> {
        ViewEngine::new(&self.collection)
    }

    /// Re-reads the stored collection, discarding the published copy.
    pub fn reload(&mut self) -> Result<(), PersistError> {
        self.collection = self.store.load_collection()?;
        Ok(())
    }

    fn transact<T, E, F>(&mut self, op: F) -> Result<T, E>
    where
        F: FnOnce(&mut Collection) -> Result<T, E>,
        E: From<PersistError>,
    {
        let latest = self.store.load_collection()?;
        let mut working = latest.clone();
        let out = op(&mut working)?;
        if working == latest {
            self.collection = working;
            return Ok(out);
        }
        if let Err(e) = self.store.save_collection(&working) {
            warn!("save failed, change discarded: {}", e);
            return Err(e.into());
        }
        self.collection = working;
        Ok(out)
    }

    // ─── Sort order ───

    pub fn sort_order(&self) -> SortOrder {
        self.collection.sort_order
    }

    pub fn set_sort_order(&mut self, order: SortOrder) -> Result<(), PersistError> {
        self.transact(|c| {
            c.sort_order = order;
            Ok::<_, PersistError>(())
        })?;
        info!("sort order set to {}", order);
        Ok(())
    }

    // ─── Bookmarks ───

    pub fn add_bookmark(
        &mut self,
        id: ExtensionId,
        category: &str,
        metadata: ResolvedMetadata,
    ) -> Result<Bookmark, BookmarkError> {
        let bookmark = self.transact(|c| BookmarkStore::new(c).add_bookmark(id, category, metadata))?;
        info!("bookmarked {} in '{}'", bookmark.id, bookmark.category);
        Ok(bookmark)
    }

    pub fn remove_bookmark(&mut self, id: &ExtensionId) -> Result<Bookmark, BookmarkError> {
        let removed = self.transact(|c| BookmarkStore::new(c).remove_bookmark(id))?;
        info!("removed bookmark {}", id);
        Ok(removed)
    }

    /// Returns `false` when the bookmark already was in `category`; nothing is written then.
    pub fn set_category(&mut self, id: &ExtensionId, category: &str) -> Result<bool, BookmarkError> {
        let changed = self.transact(|c| BookmarkStore::new(c).set_category(id, category))?;
        if changed {
            info!("moved {} to '{}'", id, category);
        } else {
            info!("{} already in '{}'", id, category);
        }
        Ok(changed)
    }

    pub fn attach_tag(&mut self, id: &ExtensionId, tag: &str) -> Result<(), BookmarkError> {
        self.transact(|c| BookmarkStore::new(c).attach_tag(id, tag))?;
        info!("tagged {} with '{}'", id, tag);
        Ok(())
    }

    pub fn detach_tag(&mut self, id: &ExtensionId, tag: &str) -> Result<(), BookmarkError> {
        self.transact(|c| BookmarkStore::new(c).detach_tag(id, tag))?;
        info!("untagged '{}' from {}", tag, id);
        Ok(())
    }

    pub fn set_note(&mut self, id: &ExtensionId, text: &str) -> Result<(), BookmarkError> {
        self.transact(|c| BookmarkStore::new(c).set_note(id, text))?;
        info!("note set on {}", id);
        Ok(())
    }

    pub fn clear_note(&mut self, id: &ExtensionId) -> Result<(), BookmarkError> {
        self.transact(|c| BookmarkStore::new(c).clear_note(id))?;
        info!("note cleared on {}", id);
        Ok(())
    }

    pub fn find_bookmark(&self, id: &ExtensionId) -> Result<&Bookmark, BookmarkError> {
        self.collection
            .find_bookmark(id)
            .ok_or_else(|| BookmarkError::NotFound(id.to_string()))
    }

    // ─── Categories ───

    pub fn add_category(&mut self, name: &str) -> Result<String, CategoryError> {
        let added = self.transact(|c| CategoryRegistry::new(c).add_category(name))?;
        info!("category '{}' added", added);
        Ok(added)
    }

    pub fn rename_category(&mut self, old: &str, new: &str) -> Result<usize, CategoryError> {
        let moved = self.transact(|c| CategoryRegistry::new(c).rename_category(old, new))?;
        info!("category '{}' renamed to '{}' ({} bookmark(s) moved)", old, new.trim(), moved);
        Ok(moved)
    }

    pub fn remove_category(&mut self, name: &str) -> Result<usize, CategoryError> {
        let reassigned = self.transact(|c| CategoryRegistry::new(c).remove_category(name))?;
        info!("category '{}' removed ({} bookmark(s) back to Default)", name, reassigned);
        Ok(reassigned)
    }

    // ─── Tags ───

    pub fn add_tag(&mut self, name: &str) -> Result<String, TagError> {
        let added = self.transact(|c| TagRegistry::new(c).add_tag(name))?;
        info!("tag '{}' added", added);
        Ok(added)
    }

    pub fn rename_tag(&mut self, old: &str, new: &str) -> Result<usize, TagError> {
        let touched = self.transact(|c| TagRegistry::new(c).rename_tag(old, new))?;
        info!("tag '{}' renamed to '{}' ({} bookmark(s) touched)", old, new, touched);
        Ok(touched)
    }

    pub fn remove_tag(&mut self, name: &str) -> Result<usize, TagError> {
        let touched = self.transact(|c| TagRegistry::new(c).remove_tag(name))?;
        info!("tag '{}' removed ({} bookmark(s) touched)", name, touched);
        Ok(touched)
    }

    // ─── Export / import ───

    pub fn export_snapshot(&self) -> Result<Snapshot, SnapshotError> {
        CollectionSerializer::export(&self.collection)
    }

    /// Merges a snapshot into the stored collection as one unit.
    pub fn import_snapshot(&mut self, snapshot: Snapshot) -> Result<MergeReport, SnapshotError> {
        let report = self.transact(|c| Ok::<_, SnapshotError>(CollectionSerializer::merge(c, snapshot)))?;
        info!(
            "import: +{} categories, +{} tags, +{} bookmarks, {} duplicate(s) kept",
            report.categories_added, report.tags_added, report.bookmarks_added, report.bookmarks_skipped
        );
        Ok(report)
    }

    /// Validates the shape of a raw JSON snapshot, then merges it.
    pub fn import_value(&mut self, value: &Value) -> Result<MergeReport, SnapshotError> {
        let snapshot = CollectionSerializer::parse(value)?;
        self.import_snapshot(snapshot)
    }

    pub fn export_to_file(&self, files: &dyn FileTransfer, path: &Path) -> Result<Snapshot, SnapshotError> {
        let snapshot = self.export_snapshot()?;
        let bytes = CollectionSerializer::to_json_bytes(&snapshot)?;
        files.write_json_file(path, &bytes)?;
        info!("exported collection to {}", path.display());
        Ok(snapshot)
    }

    pub fn import_from_file(&mut self, files: &dyn FileTransfer, path: &Path) -> Result<MergeReport, SnapshotError> {
        let bytes = files.read_json_file(path)?;
        let snapshot = CollectionSerializer::from_json_bytes(&bytes)?;
        self.import_snapshot(snapshot)
    }
}
