//! Database connection management

#![allow(clippy::result_large_err)]

use crate::config::{StoreConfig, StoreLocation};
use crate::errors::{from_rusqlite, io_error, Result};
use rusqlite::Connection;

/// Open and configure a connection as described by `config`
pub fn open(config: &StoreConfig) -> Result<Connection> {
    let conn = match &config.location {
        StoreLocation::File(path) => {
            if config.create_dirs {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| io_error("create_db_dir", e))?;
                }
            }
            Connection::open(path).map_err(from_rusqlite)?
        }
        StoreLocation::InMemory => Connection::open_in_memory().map_err(from_rusqlite)?,
    };

    configure(&conn, config)?;
    Ok(conn)
}

/// Apply per-connection pragmas
pub fn configure(conn: &Connection, config: &StoreConfig) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", config.enforce_foreign_keys)
        .map_err(from_rusqlite)?;

    if config.wal && matches!(config.location, StoreLocation::File(_)) {
        // journal_mode answers with the resulting mode
        let mode: String = conn
            .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
            .map_err(from_rusqlite)?;
        tracing::debug!(journal_mode = %mode, "configured journal");
    }

    Ok(())
}
