//! The repository handle
//!
//! `Repository` owns the single connection of an opened store. Entity
//! operations are grouped per table family in the submodules, each adding an
//! `impl Repository` block. Lookups report absence as `None`; writes report
//! storage-enforced invariants as `ConstraintViolation`.

#![allow(clippy::result_large_err)]

mod clubs;
mod events;
mod friends;
mod media;
mod reviews;
mod users;

use crate::config::{StoreConfig, StoreLocation};
use crate::db;
use crate::errors::{sql_error, storage_closed, Result};
use crate::migrations::{apply_migrations, current_version};
use rusqlite::Connection;

/// An opened store: explicitly opened, explicitly closed
pub struct Repository {
    conn: Option<Connection>,
    location: StoreLocation,
}

impl Repository {
    /// Open the database and bring its schema to the latest version
    ///
    /// Fails with `StorageUnavailable` if the schema cannot be migrated.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let mut conn = db::open(config)?;
        let version = apply_migrations(&mut conn)?;
        tracing::debug!(location = ?config.location, version, "repository opened");
        Ok(Self {
            conn: Some(conn),
            location: config.location.clone(),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open(&StoreConfig::in_memory())
    }

    /// Release the connection; every later call fails with `StorageUnavailable`
    pub fn close(&mut self) -> Result<()> {
        let conn = self.conn.take().ok_or_else(|| storage_closed("close"))?;
        conn.close().map_err(|(_, e)| sql_error("close")(e))?;
        tracing::debug!(location = ?self.location, "repository closed");
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    pub fn schema_version(&self) -> Result<u32> {
        current_version(self.conn("schema_version")?)
    }

    fn conn(&self, op: &'static str) -> Result<&Connection> {
        self.conn.as_ref().ok_or_else(|| storage_closed(op))
    }

    fn conn_mut(&mut self, op: &'static str) -> Result<&mut Connection> {
        self.conn.as_mut().ok_or_else(|| storage_closed(op))
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("location", &self.location)
            .field("open", &self.is_open())
            .finish()
    }
}
