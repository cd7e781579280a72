//! Error handling for clubnet-store
//!
//! Wraps the core `ExError` with store-specific constructors and the
//! classification of rusqlite failures.

use clubnet_core::errors::{ExError, ExErrorKind};
use rusqlite::ErrorCode;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Classify a rusqlite error
///
/// UNIQUE, CHECK, NOT NULL and FOREIGN KEY failures all surface from SQLite
/// as `SQLITE_CONSTRAINT` and become `ConstraintViolation`; anything else is
/// `Persistence`.
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    let kind = match &err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
            ExErrorKind::ConstraintViolation
        }
        _ => ExErrorKind::Persistence,
    };
    ExError::new(kind).with_op("sqlite").with_message(err.to_string())
}

/// `from_rusqlite`, tagged with the repository operation that failed
pub fn sql_error(op: &'static str) -> impl Fn(rusqlite::Error) -> ExError {
    move |err| from_rusqlite(err).with_op(op)
}

/// The repository handle has been closed
pub fn storage_closed(op: &str) -> ExError {
    ExError::new(ExErrorKind::StorageUnavailable)
        .with_op(op.to_string())
        .with_message("repository is closed")
}

/// A migration step failed to apply
pub fn migration_error(migration_id: &str, source: ExError) -> ExError {
    ExError::new(ExErrorKind::StorageUnavailable)
        .with_op("migration")
        .with_message(format!("Migration {} failed", migration_id))
        .with_source(source)
}

/// A recorded migration was produced by different SQL
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::StorageUnavailable)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: recorded {}, embedded {}",
            migration_id, actual, expected
        ))
}

/// The database was migrated by a newer build
pub fn schema_too_new(found: u32, supported: u32) -> ExError {
    ExError::new(ExErrorKind::StorageUnavailable)
        .with_op("migration")
        .with_message(format!(
            "Database schema version {} is newer than supported version {}",
            found, supported
        ))
}

pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::StorageUnavailable)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
