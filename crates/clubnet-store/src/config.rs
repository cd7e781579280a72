//! Store configuration

use std::path::{Path, PathBuf};

/// Where the database lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    InMemory,
}

/// Options consumed by `Repository::open`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub location: StoreLocation,
    /// `PRAGMA foreign_keys`; cascades and FK checks depend on it
    pub enforce_foreign_keys: bool,
    /// WAL journal so readers do not block on the writer (file databases only)
    pub wal: bool,
    /// Create missing parent directories of a file database
    pub create_dirs: bool,
}

impl StoreConfig {
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            location: StoreLocation::File(path.as_ref().to_path_buf()),
            enforce_foreign_keys: true,
            wal: true,
            create_dirs: true,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            location: StoreLocation::InMemory,
            enforce_foreign_keys: true,
            wal: false,
            create_dirs: false,
        }
    }

    pub fn with_wal(mut self, wal: bool) -> Self {
        self.wal = wal;
        self
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            StoreLocation::File(path) => Some(path),
            StoreLocation::InMemory => None,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::file(".clubnet/clubnet.db")
    }
}
