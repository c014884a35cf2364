//! Database layer.
//!
//! Provides SQLite connection management, schema migrations and the
//! collection persistence seam.
//!
//! # Usage
//!
//! ```no_run
//! use extbookmarks::database::{CollectionStore, Database, SqliteCollectionStore};
//!
//! let db = Database::open("extbookmarks.db").expect("failed to open database");
//! let store = SqliteCollectionStore::new(db);
//! let collection = store.load_collection().expect("failed to load collection");
//! assert!(collection.has_category("Default"));
//! ```

pub mod collection_store;
pub mod connection;
pub mod migrations;

pub use collection_store::{CollectionStore, MemoryCollectionStore, SqliteCollectionStore};
pub use connection::Database;
