//! Migration runner
//!
//! Any failure here is reported as `StorageUnavailable`: the caller must not
//! use a database whose schema is not exactly the expected one.

#![allow(clippy::result_large_err)]

use std::collections::BTreeMap;

use crate::errors::{
    checksum_mismatch, from_rusqlite, migration_error, schema_too_new, Result,
};
use crate::migrations::checksums::compute_checksum;
use crate::migrations::embedded::{get_migrations, Migration, LATEST_VERSION};
use crate::migrations::layout;
use clubnet_core::errors::{ExError, ExErrorKind};
use rusqlite::{Connection, OptionalExtension, Transaction};

/// Bring the database to `LATEST_VERSION`, returning the resulting version
pub fn apply_migrations(conn: &mut Connection) -> Result<u32> {
    apply_migrations_through(conn, LATEST_VERSION)
}

/// Apply pending steps up to and including `target`
///
/// Used directly to build older schemas (e.g. for upgrade tests).
pub fn apply_migrations_through(conn: &mut Connection, target: u32) -> Result<u32> {
    run(conn, target).map_err(|e| {
        if e.kind() == ExErrorKind::StorageUnavailable {
            e
        } else {
            ExError::new(ExErrorKind::StorageUnavailable)
                .with_op("migration")
                .with_message("schema initialization failed")
                .with_source(e)
        }
    })
}

/// Highest applied version; 0 for a database never migrated
pub fn current_version(conn: &Connection) -> Result<u32> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
            [],
            |_| Ok(true),
        )
        .optional()
        .map_err(from_rusqlite)?
        .unwrap_or(false);

    if !has_table {
        return Ok(0);
    }

    let version: Option<u32> = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get(0)
        })
        .map_err(from_rusqlite)?;
    Ok(version.unwrap_or(0))
}

fn run(conn: &mut Connection, target: u32) -> Result<u32> {
    create_schema_version_table(conn)?;

    let applied = load_applied(conn)?;
    if let Some((&found, _)) = applied.iter().next_back() {
        if found > LATEST_VERSION {
            return Err(schema_too_new(found, LATEST_VERSION));
        }
    }

    for migration in get_migrations().iter().filter(|m| m.version <= target) {
        let checksum = compute_checksum(migration.sql);
        match applied.get(&migration.version) {
            Some(recorded) if *recorded == checksum => {
                tracing::debug!(migration = migration.id, "already applied");
            }
            Some(recorded) => {
                return Err(checksum_mismatch(migration.id, &checksum, recorded));
            }
            None => apply_migration(conn, migration, &checksum)?,
        }
    }

    current_version(conn)
}

fn create_schema_version_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            migration_id TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL,
            checksum TEXT NOT NULL
        )",
        [],
    )
    .map_err(from_rusqlite)?;

    Ok(())
}

fn load_applied(conn: &Connection) -> Result<BTreeMap<u32, String>> {
    let mut stmt = conn
        .prepare("SELECT version, checksum FROM schema_version")
        .map_err(from_rusqlite)?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<BTreeMap<u32, String>, _>>()
        .map_err(from_rusqlite)?;
    Ok(rows)
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
            [table, column],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)?;
    Ok(count > 0)
}

/// Apply one step and record it, atomically
fn apply_migration(conn: &mut Connection, migration: &Migration, checksum: &str) -> Result<()> {
    if migration.version == 1 && layout::is_legacy_layout(conn)? {
        tracing::debug!(migration = migration.id, "adopting pre-versioning tables");
        return layout::with_foreign_keys_off(conn, |conn| {
            record_step(conn, migration, checksum, |tx| {
                layout::adopt_legacy(tx, migration.sql)
            })
        });
    }

    record_step(conn, migration, checksum, |tx| {
        let already_present = match migration.adds_column {
            Some((table, column)) => column_exists(tx, table, column)?,
            None => false,
        };

        if already_present {
            tracing::debug!(migration = migration.id, "column already present, recording only");
            Ok(())
        } else {
            tx.execute_batch(migration.sql).map_err(from_rusqlite)
        }
    })
}

fn record_step(
    conn: &mut Connection,
    migration: &Migration,
    checksum: &str,
    body: impl FnOnce(&Transaction<'_>) -> Result<()>,
) -> Result<()> {
    let tx = conn.transaction().map_err(from_rusqlite)?;

    body(&tx).map_err(|e| migration_error(migration.id, e))?;
    if migration.version == 1 {
        layout::verify_v1_layout(&tx).map_err(|e| migration_error(migration.id, e))?;
    }

    tx.execute(
        "INSERT INTO schema_version (version, migration_id, applied_at, checksum)
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![
            migration.version,
            migration.id,
            chrono::Utc::now().timestamp(),
            checksum
        ],
    )
    .map_err(from_rusqlite)?;

    tx.commit().map_err(from_rusqlite)?;

    tracing::debug!(
        migration = migration.id,
        version = migration.version,
        "applied migration"
    );
    Ok(())
}
