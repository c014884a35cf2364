//! App Core.
//!
//! Central struct holding the collection manager and its collaborators:
//! settings, the marketplace resolver and snapshot file transfer.

use std::sync::Arc;

use log::warn;

use crate::database::collection_store::SqliteCollectionStore;
use crate::database::connection::Database;
use crate::managers::collection_manager::CollectionManager;
use crate::services::file_transfer::LocalFileTransfer;
use crate::services::metadata_resolver::{MarketplaceResolver, MetadataResolver};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

/// Central application struct.
pub struct App {
    pub manager: CollectionManager,
    pub settings_engine: SettingsEngine,
    pub resolver: Arc<dyn MetadataResolver>,
    pub files: LocalFileTransfer,
}

impl App {
    /// Creates a new App backed by the SQLite file at `db_path`.
    ///
    /// Settings are read from `settings_path` (or the platform default);
    /// unreadable settings fall back to defaults.
    pub fn new(db_path: &str, settings_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings_engine = SettingsEngine::new(settings_path);
        if let Err(e) = settings_engine.load() {
            warn!("using default settings: {}", e);
        }
        let settings = settings_engine.get_settings().clone();

        let db = Database::open(db_path)?;
        let store = SqliteCollectionStore::new(db)
            .with_default_sort_order(settings.general.default_sort_order);
        let manager = CollectionManager::open(Box::new(store))
            .map_err(|e| format!("CollectionManager init failed: {}", e))?;
        let resolver = MarketplaceResolver::new(settings.marketplace)
            .map_err(|e| format!("MarketplaceResolver init failed: {}", e))?;

        Ok(Self::with_parts(manager, settings_engine, Arc::new(resolver)))
    }

    /// Assembles an App from already constructed parts.
    pub fn with_parts(
        manager: CollectionManager,
        settings_engine: SettingsEngine,
        resolver: Arc<dyn MetadataResolver>,
    ) -> Self {
        Self {
            manager,
            settings_engine,
            resolver,
            files: LocalFileTransfer,
        }
    }
}
