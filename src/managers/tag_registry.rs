//! Tag Registry.
//!
//! Maintains the tag names of a borrowed [`Collection`]. New names are
//! trimmed and lowercased before storage; lookups compare case-insensitively
//! so imported mixed-case tags stay reachable. Unlike categories there is no
//! pinned entry, and removal simply detaches the tag from every bookmark.

use log::debug;

use crate::managers::bookmark_store::BookmarkStore;
use crate::types::collection::Collection;
use crate::types::errors::TagError;

/// Trait defining tag registry operations.
pub trait TagRegistryTrait {
    fn add_tag(&mut self, name: &str) -> Result<String, TagError>;
    /// Renames a tag in the registry and on every bookmark. Returns the number of bookmarks touched.
    fn rename_tag(&mut self, old: &str, new: &str) -> Result<usize, TagError>;
    /// Removes a tag from the registry and every bookmark. Returns the number of bookmarks touched.
    fn remove_tag(&mut self, name: &str) -> Result<usize, TagError>;
    fn list_tags(&self) -> Vec<String>;
}

/// Tag registry over a mutably borrowed collection.
pub struct TagRegistry<'a> {
    collection: &'a mut Collection,
}

impl<'a> TagRegistry<'a> {
    pub fn new(collection: &'a mut Collection) -> Self {
        Self { collection }
    }

    /// Canonical stored form of a tag name.
    pub fn normalize(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Tags ordered case-insensitively, computed on every call.
    pub fn ordered(tags: &[String]) -> Vec<String> {
        let mut ordered = tags.to_vec();
        ordered.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
        ordered
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.collection.tag_position(name)
    }
}

impl<'a> TagRegistryTrait for TagRegistry<'a> {
    fn add_tag(&mut self, name: &str) -> Result<String, TagError> {
        let name = Self::normalize(name);
        if name.is_empty() {
            return Err(TagError::InvalidName);
        }
        if self.position(&name).is_some() {
            return Err(TagError::Duplicate(name));
        }
        self.collection.tags.push(name.clone());
        Ok(name)
    }

    fn rename_tag(&mut self, old: &str, new: &str) -> Result<usize, TagError> {
        let old = Self::normalize(old);
        let new = Self::normalize(new);
        let index = self.position(&old).ok_or_else(|| TagError::NotFound(old.clone()))?;
        if new.is_empty() {
            return Err(TagError::InvalidName);
        }
        if self.position(&new).is_some_and(|other| other != index) {
            return Err(TagError::Duplicate(new));
        }
        // "Py" -> "py" only fixes the case of an imported tag.
        let stored = self.collection.tags[index].clone();
        if stored == new {
            return Err(TagError::NoOpRename(old));
        }

        self.collection.tags[index] = new.clone();
        let touched = BookmarkStore::new(&mut *self.collection).rename_tag(&stored, &new);
        debug!("tag '{}' renamed to '{}'", stored, new);
        Ok(touched)
    }

    fn remove_tag(&mut self, name: &str) -> Result<usize, TagError> {
        let name = Self::normalize(name);
        let index = self.position(&name).ok_or_else(|| TagError::NotFound(name.clone()))?;

        let stored = self.collection.tags.remove(index);
        let touched = BookmarkStore::new(&mut *self.collection).drop_tag(&stored);
        debug!("tag '{}' removed", stored);
        Ok(touched)
    }

    fn list_tags(&self) -> Vec<String> {
        Self::ordered(&self.collection.tags)
    }
}
