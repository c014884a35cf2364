//! Category Registry.
//!
//! Maintains the category names of a borrowed [`Collection`]. Names are
//! unique by case-sensitive comparison. `"Default"` is pinned: it can be
//! neither renamed nor removed, and it receives the bookmarks of any
//! removed category.

use log::debug;

use crate::managers::bookmark_store::BookmarkStore;
use crate::types::collection::{Collection, DEFAULT_CATEGORY};
use crate::types::errors::CategoryError;

/// Trait defining category registry operations.
pub trait CategoryRegistryTrait {
    fn add_category(&mut self, name: &str) -> Result<String, CategoryError>;
    /// Renames a category and moves its bookmarks along. Returns the number of bookmarks moved.
    fn rename_category(&mut self, old: &str, new: &str) -> Result<usize, CategoryError>;
    /// Removes a category and sends its bookmarks to `"Default"`. Returns the number reassigned.
    fn remove_category(&mut self, name: &str) -> Result<usize, CategoryError>;
    fn list_categories(&self) -> Vec<String>;
}

/// Category registry over a mutably borrowed collection.
pub struct CategoryRegistry<'a> {
    collection: &'a mut Collection,
}

impl<'a> CategoryRegistry<'a> {
    pub fn new(collection: &'a mut Collection) -> Self {
        Self { collection }
    }

    /// `"Default"` first, then the rest ordered case-insensitively.
    ///
    /// Computed on every call; the stored order is insertion order.
    pub fn ordered(categories: &[String]) -> Vec<String> {
        let mut rest: Vec<String> = categories
            .iter()
            .filter(|c| c.as_str() != DEFAULT_CATEGORY)
            .cloned()
            .collect();
        rest.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));

        let mut ordered = Vec::with_capacity(rest.len() + 1);
        if categories.iter().any(|c| c == DEFAULT_CATEGORY) {
            ordered.push(DEFAULT_CATEGORY.to_string());
        }
        ordered.extend(rest);
        ordered
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.collection.categories.iter().position(|c| c == name)
    }
}

impl<'a> CategoryRegistryTrait for CategoryRegistry<'a> {
    fn add_category(&mut self, name: &str) -> Result<String, CategoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CategoryError::InvalidName);
        }
        if self.collection.has_category(name) {
            return Err(CategoryError::Duplicate(name.to_string()));
        }
        self.collection.categories.push(name.to_string());
        Ok(name.to_string())
    }

    fn rename_category(&mut self, old: &str, new: &str) -> Result<usize, CategoryError> {
        let new = new.trim();
        let index = self
            .position(old)
            .ok_or_else(|| CategoryError::NotFound(old.to_string()))?;
        if old == DEFAULT_CATEGORY {
            return Err(CategoryError::Protected(old.to_string()));
        }
        if new.is_empty() {
            return Err(CategoryError::InvalidName);
        }
        if new != old && self.collection.has_category(new) {
            return Err(CategoryError::Duplicate(new.to_string()));
        }
        if new == old {
            return Err(CategoryError::NoOpRename(old.to_string()));
        }

        self.collection.categories[index] = new.to_string();
        let moved = BookmarkStore::new(&mut *self.collection).reassign_category(old, new);
        debug!("category '{}' renamed to '{}'", old, new);
        Ok(moved)
    }

    fn remove_category(&mut self, name: &str) -> Result<usize, CategoryError> {
        let index = self
            .position(name)
            .ok_or_else(|| CategoryError::NotFound(name.to_string()))?;
        if name == DEFAULT_CATEGORY {
            return Err(CategoryError::Protected(name.to_string()));
        }

        self.collection.categories.remove(index);
        let reassigned = BookmarkStore::new(&mut *self.collection).drop_category(name);
        debug!("category '{}' removed", name);
        Ok(reassigned)
    }

    fn list_categories(&self) -> Vec<String> {
        Self::ordered(&self.collection.categories)
    }
}
