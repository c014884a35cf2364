//! Persistence of the whole collection.
//!
//! [`CollectionStore`] is the load/save seam used by the collection manager.
//! [`SqliteCollectionStore`] rewrites every table inside one SQLite
//! transaction, so a failed save leaves the previously stored collection
//! intact. [`MemoryCollectionStore`] keeps the collection in process.

use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;
use std::sync::Mutex;

use log::{debug, warn};
use rusqlite::{params, OptionalExtension};

use super::connection::Database;
use crate::types::bookmark::Bookmark;
use crate::types::collection::{Collection, SortOrder};
use crate::types::errors::PersistError;
use crate::types::identifier::ExtensionId;

const SORT_ORDER_KEY: &str = "sort_order";

/// Trait defining the persistence collaborator.
pub trait CollectionStore: Send {
    /// Loads the stored collection, or the initial state when nothing is stored.
    fn load_collection(&self) -> Result<Collection, PersistError>;
    /// Replaces the stored collection. Either everything is written or nothing is.
    fn save_collection(&self, collection: &Collection) -> Result<(), PersistError>;
}

/// Collection store backed by SQLite.
pub struct SqliteCollectionStore {
    db: Database,
    default_sort_order: SortOrder,
}

impl SqliteCollectionStore {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            default_sort_order: SortOrder::default(),
        }
    }

    /// Sort order reported for a database that has never stored one.
    pub fn with_default_sort_order(mut self, order: SortOrder) -> Self {
        self.default_sort_order = order;
        self
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn load_names(&self, table: &str) -> Result<Vec<String>, PersistError> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare(&format!("SELECT name FROM {} ORDER BY position", table))?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut names = Vec::new();
        for row in rows {
            names.push(row?);
        }
        Ok(names)
    }

    fn load_bookmark_tags(&self) -> Result<HashMap<String, BTreeSet<String>>, PersistError> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare("SELECT bookmark_id, tag FROM bookmark_tags")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;
        let mut tags: HashMap<String, BTreeSet<String>> = HashMap::new();
        for row in rows {
            let (bookmark_id, tag) = row?;
            tags.entry(bookmark_id).or_default().insert(tag);
        }
        Ok(tags)
    }

    fn load_bookmarks(&self) -> Result<Vec<Bookmark>, PersistError> {
        let mut tags = self.load_bookmark_tags()?;
        let conn = self.db.connection();
        let mut stmt = conn.prepare(
            "SELECT id, display_name, icon, category, date_added, download_count, rating, last_update, note \
             FROM bookmarks ORDER BY position",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
                row.get::<_, i64>(7)?,
                row.get::<_, Option<String>>(8)?,
            ))
        })?;

        let mut bookmarks = Vec::new();
        for row in rows {
            let (raw_id, display_name, icon, category, date_added, download_count, rating, last_update, note) = row?;
            let id = ExtensionId::parse(&raw_id)
                .map_err(|e| PersistError::SerializationError(e.to_string()))?;
            bookmarks.push(Bookmark {
                tags: tags.remove(&raw_id).unwrap_or_default(),
                id,
                display_name,
                icon,
                category,
                date_added,
                download_count,
                rating,
                last_update,
                note,
            });
        }
        Ok(bookmarks)
    }

    fn load_sort_order(&self) -> Result<SortOrder, PersistError> {
        let stored: Option<String> = self
            .db
            .connection()
            .query_row(
                "SELECT value FROM collection_meta WHERE key = ?1",
                params![SORT_ORDER_KEY],
                |row| row.get(0),
            )
            .optional()?;
        match stored {
            Some(value) => SortOrder::from_str(&value).or_else(|e| {
                warn!("{}; falling back to {}", e, self.default_sort_order);
                Ok(self.default_sort_order)
            }),
            None => Ok(self.default_sort_order),
        }
    }
}

impl CollectionStore for SqliteCollectionStore {
    fn load_collection(&self) -> Result<Collection, PersistError> {
        let mut collection = Collection {
            categories: self.load_names("categories")?,
            bookmarks: self.load_bookmarks()?,
            tags: self.load_names("tags")?,
            sort_order: self.load_sort_order()?,
        };
        collection.normalize();
        Ok(collection)
    }

    fn save_collection(&self, collection: &Collection) -> Result<(), PersistError> {
        let tx = self.db.connection().unchecked_transaction()?;

        tx.execute_batch(
            "DELETE FROM bookmark_tags;
             DELETE FROM bookmarks;
             DELETE FROM tags;
             DELETE FROM categories;",
        )?;

        for (position, name) in collection.categories.iter().enumerate() {
            tx.execute(
                "INSERT INTO categories (name, position) VALUES (?1, ?2)",
                params![name, position as i64],
            )?;
        }
        for (position, name) in collection.tags.iter().enumerate() {
            tx.execute(
                "INSERT INTO tags (name, position) VALUES (?1, ?2)",
                params![name, position as i64],
            )?;
        }
        for (position, b) in collection.bookmarks.iter().enumerate() {
            let id = b.id.to_string();
            tx.execute(
                "INSERT INTO bookmarks (id, display_name, icon, category, date_added, download_count, rating, last_update, note, position) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    id,
                    b.display_name,
                    b.icon,
                    b.category,
                    b.date_added,
                    b.download_count,
                    b.rating,
                    b.last_update,
                    b.note,
                    position as i64
                ],
            )?;
            for tag in &b.tags {
                tx.execute(
                    "INSERT INTO bookmark_tags (bookmark_id, tag) VALUES (?1, ?2)",
                    params![id, tag],
                )?;
            }
        }
        tx.execute(
            "INSERT OR REPLACE INTO collection_meta (key, value) VALUES (?1, ?2)",
            params![SORT_ORDER_KEY, collection.sort_order.as_str()],
        )?;

        tx.commit()?;
        debug!(
            "saved collection: {} categories, {} bookmarks, {} tags",
            collection.categories.len(),
            collection.bookmarks.len(),
            collection.tags.len()
        );
        Ok(())
    }
}

/// Collection store kept entirely in memory.
#[derive(Default)]
pub struct MemoryCollectionStore {
    stored: Mutex<Option<Collection>>,
}

impl MemoryCollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an already populated collection.
    pub fn with_collection(collection: Collection) -> Self {
        Self {
            stored: Mutex::new(Some(collection)),
        }
    }
}

impl CollectionStore for MemoryCollectionStore {
    fn load_collection(&self) -> Result<Collection, PersistError> {
        let stored = self
            .stored
            .lock()
            .map_err(|e| PersistError::DatabaseError(e.to_string()))?;
        let mut collection = stored.clone().unwrap_or_default();
        collection.normalize();
        Ok(collection)
    }

    fn save_collection(&self, collection: &Collection) -> Result<(), PersistError> {
        let mut stored = self
            .stored
            .lock()
            .map_err(|e| PersistError::DatabaseError(e.to_string()))?;
        *stored = Some(collection.clone());
        Ok(())
    }
}
