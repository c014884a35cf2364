//! Bookmark Store.
//!
//! Implements `BookmarkStoreTrait`: CRUD, category reassignment and
//! tag/note mutation over the bookmarks of a borrowed [`Collection`].
//! Also owns the cascade mutators the category and tag registries call
//! when an entry is renamed or removed.

use std::collections::BTreeSet;
use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;

use crate::types::bookmark::{Bookmark, ResolvedMetadata};
use crate::types::collection::{same_tag, Collection, DEFAULT_CATEGORY};
use crate::types::errors::BookmarkError;
use crate::types::identifier::ExtensionId;

/// Trait defining bookmark store operations.
pub trait BookmarkStoreTrait {
    fn add_bookmark(
        &mut self,
        id: ExtensionId,
        category: &str,
        metadata: ResolvedMetadata,
    ) -> Result<Bookmark, BookmarkError>;
    fn remove_bookmark(&mut self, id: &ExtensionId) -> Result<Bookmark, BookmarkError>;
    /// Returns `false` when the bookmark already was in `category`.
    fn set_category(&mut self, id: &ExtensionId, category: &str) -> Result<bool, BookmarkError>;
    fn attach_tag(&mut self, id: &ExtensionId, tag: &str) -> Result<(), BookmarkError>;
    fn detach_tag(&mut self, id: &ExtensionId, tag: &str) -> Result<(), BookmarkError>;
    fn set_note(&mut self, id: &ExtensionId, text: &str) -> Result<(), BookmarkError>;
    fn clear_note(&mut self, id: &ExtensionId) -> Result<(), BookmarkError>;
    fn find_bookmark(&self, id: &ExtensionId) -> Result<&Bookmark, BookmarkError>;
}

/// Bookmark store over a mutably borrowed collection.
pub struct BookmarkStore<'a> {
    collection: &'a mut Collection,
}

impl<'a> BookmarkStore<'a> {
    pub fn new(collection: &'a mut Collection) -> Self {
        Self { collection }
    }

    /// Returns the current UNIX timestamp in seconds.
    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Removes every spelling of `tag` from `tags`; true if any was present.
    fn strip_tag(tags: &mut BTreeSet<String>, tag: &str) -> bool {
        let before = tags.len();
        tags.retain(|t| !same_tag(t, tag));
        tags.len() != before
    }

    fn locate(&mut self, id: &ExtensionId) -> Result<&mut Bookmark, BookmarkError> {
        self.collection
            .find_bookmark_mut(id)
            .ok_or_else(|| BookmarkError::NotFound(id.to_string()))
    }

    /// Moves every bookmark in category `old` to `new`. Returns the number moved.
    pub fn reassign_category(&mut self, old: &str, new: &str) -> usize {
        let mut moved = 0;
        for bookmark in self.collection.bookmarks.iter_mut().filter(|b| b.category == old) {
            bookmark.category = new.to_string();
            moved += 1;
        }
        debug!("reassigned {} bookmark(s) from '{}' to '{}'", moved, old, new);
        moved
    }

    /// Sends every bookmark in category `old` back to `"Default"`.
    pub fn drop_category(&mut self, old: &str) -> usize {
        self.reassign_category(old, DEFAULT_CATEGORY)
    }

    /// Replaces tag `old` (any case) with `new` on every bookmark carrying it.
    ///
    /// Tags are a set, so a bookmark that already carried `new` ends up with
    /// a single `new`.
    pub fn rename_tag(&mut self, old: &str, new: &str) -> usize {
        let mut touched = 0;
        for bookmark in self.collection.bookmarks.iter_mut() {
            if Self::strip_tag(&mut bookmark.tags, old) {
                bookmark.tags.insert(new.to_string());
                touched += 1;
            }
        }
        debug!("renamed tag '{}' to '{}' on {} bookmark(s)", old, new, touched);
        touched
    }

    /// Detaches tag `old` (any case) from every bookmark.
    pub fn drop_tag(&mut self, old: &str) -> usize {
        let mut touched = 0;
        for bookmark in self.collection.bookmarks.iter_mut() {
            if Self::strip_tag(&mut bookmark.tags, old) {
                touched += 1;
            }
        }
        debug!("dropped tag '{}' from {} bookmark(s)", old, touched);
        touched
    }
}

impl<'a> BookmarkStoreTrait for BookmarkStore<'a> {
    /// Adds a new bookmark with no tags and no note, stamped with the current time.
    fn add_bookmark(
        &mut self,
        id: ExtensionId,
        category: &str,
        metadata: ResolvedMetadata,
    ) -> Result<Bookmark, BookmarkError> {
        if self.collection.contains_bookmark(&id) {
            return Err(BookmarkError::Duplicate(id.to_string()));
        }
        if !self.collection.has_category(category) {
            return Err(BookmarkError::UnknownCategory(category.to_string()));
        }

        let bookmark = Bookmark::new(id, category, metadata, Self::now());
        self.collection.bookmarks.push(bookmark.clone());
        Ok(bookmark)
    }

    /// Removes a bookmark. Nothing else references bookmarks, so there is no cascade.
    fn remove_bookmark(&mut self, id: &ExtensionId) -> Result<Bookmark, BookmarkError> {
        let index = self
            .collection
            .bookmarks
            .iter()
            .position(|b| b.id == *id)
            .ok_or_else(|| BookmarkError::NotFound(id.to_string()))?;
        Ok(self.collection.bookmarks.remove(index))
    }

    fn set_category(&mut self, id: &ExtensionId, category: &str) -> Result<bool, BookmarkError> {
        if !self.collection.has_category(category) {
            return Err(BookmarkError::UnknownCategory(category.to_string()));
        }
        let bookmark = self.locate(id)?;
        if bookmark.category == category {
            return Ok(false);
        }
        bookmark.category = category.to_string();
        Ok(true)
    }

    /// Attaches the registered spelling of `tag`.
    fn attach_tag(&mut self, id: &ExtensionId, tag: &str) -> Result<(), BookmarkError> {
        let registered = match self.collection.tag_position(tag) {
            Some(index) => self.collection.tags[index].clone(),
            None => return Err(BookmarkError::UnknownTag(tag.trim().to_lowercase())),
        };
        let bookmark = self.locate(id)?;
        if bookmark.tags.iter().any(|t| same_tag(t, &registered)) {
            return Err(BookmarkError::DuplicateTag(registered));
        }
        bookmark.tags.insert(registered);
        Ok(())
    }

    fn detach_tag(&mut self, id: &ExtensionId, tag: &str) -> Result<(), BookmarkError> {
        let bookmark = self.locate(id)?;
        if !Self::strip_tag(&mut bookmark.tags, tag) {
            return Err(BookmarkError::TagNotAttached(tag.trim().to_lowercase()));
        }
        Ok(())
    }

    fn set_note(&mut self, id: &ExtensionId, text: &str) -> Result<(), BookmarkError> {
        self.locate(id)?.note = Some(text.to_string());
        Ok(())
    }

    fn clear_note(&mut self, id: &ExtensionId) -> Result<(), BookmarkError> {
        self.locate(id)?.note = None;
        Ok(())
    }

    fn find_bookmark(&self, id: &ExtensionId) -> Result<&Bookmark, BookmarkError> {
        self.collection
            .find_bookmark(id)
            .ok_or_else(|| BookmarkError::NotFound(id.to_string()))
    }
}
