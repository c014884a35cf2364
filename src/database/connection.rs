//! SQLite connection for the collection database.
//!
//! [`Database`] owns one `rusqlite::Connection`; opening it brings the
//! schema up to date before anything else touches the collection tables.

use std::path::Path;
use std::time::Duration;

use log::debug;
use rusqlite::Connection;

use super::migrations;

/// How long a write waits on a lock held by another process.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the collection database at `path`.
    ///
    /// Missing parent directories are created first.
    ///
    /// # Errors
    /// Returns `rusqlite::Error` if the file cannot be opened or migrated.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                rusqlite::Error::InvalidPath(format!("{}: {}", parent.display(), e).into())
            })?;
        }
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        debug!("opened collection database at {}", path.display());
        Self::migrated(conn)
    }

    /// Opens a private in-memory database, discarded on drop.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::migrated(Connection::open_in_memory()?)
    }

    fn migrated(conn: Connection) -> Result<Self, rusqlite::Error> {
        migrations::run_all(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
