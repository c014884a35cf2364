// Collection managers
// Stateful operations on the collection: bookmarks, categories, tags and the transactional facade.

pub mod bookmark_store;
pub mod category_registry;
pub mod collection_manager;
pub mod tag_registry;
