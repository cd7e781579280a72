//! Version-1 table layout checks and adoption of pre-versioning databases
//!
//! Databases written by the mobile app before `schema_version` existed carry
//! the seven tables with looser columns: `DATETIME` text timestamps, nullable
//! references, and a Media `type` CHECK without `'audio'`. Step 1 rebuilds
//! such a database into the current layout instead of recording it as is.

use rusqlite::{Connection, OptionalExtension, Transaction};

use crate::errors::{from_rusqlite, Result};
use clubnet_core::errors::{ExError, ExErrorKind};

/// Columns every version-1 table must have, in creation order
const V1_TABLES: &[(&str, &[&str])] = &[
    (
        "Users",
        &["user_id", "name", "email", "password_hash", "bio", "location", "preferences"],
    ),
    ("Friends", &["user_id", "friend_id", "status"]),
    (
        "Clubs",
        &["club_id", "name", "description", "sport_type", "location_lat", "location_long", "owner_id"],
    ),
    (
        "Events",
        &[
            "event_id",
            "club_id",
            "host_id",
            "title",
            "description",
            "date",
            "time",
            "location_lat",
            "location_long",
            "max_participants",
        ],
    ),
    ("Event_Attendance", &["event_id", "user_id", "status"]),
    (
        "Reviews",
        &["review_id", "club_id", "user_id", "rating", "text", "media_url", "timestamp"],
    ),
    ("Media", &["media_id", "user_id", "event_id", "type", "url", "timestamp"]),
];

/// Legacy text timestamps become Unix seconds; unparseable text stays NULL
/// and fails the NOT NULL column
const TIMESTAMP_SECONDS: &str = "CASE typeof(timestamp) \
     WHEN 'integer' THEN timestamp \
     WHEN 'text' THEN CAST(strftime('%s', timestamp) AS INTEGER) \
     END";

/// Delete rules the app never enforced (it ran without `foreign_keys`)
const ORPHAN_CLEANUP: &str = "
    DELETE FROM Friends
     WHERE user_id NOT IN (SELECT user_id FROM Users)
        OR friend_id NOT IN (SELECT user_id FROM Users);
    UPDATE Clubs SET owner_id = NULL
     WHERE owner_id IS NOT NULL AND owner_id NOT IN (SELECT user_id FROM Users);
    DELETE FROM Events
     WHERE club_id NOT IN (SELECT club_id FROM Clubs)
        OR host_id NOT IN (SELECT user_id FROM Users);
    DELETE FROM Event_Attendance
     WHERE event_id NOT IN (SELECT event_id FROM Events)
        OR user_id NOT IN (SELECT user_id FROM Users);
    DELETE FROM Reviews
     WHERE club_id NOT IN (SELECT club_id FROM Clubs)
        OR user_id NOT IN (SELECT user_id FROM Users);
    UPDATE Media SET event_id = NULL
     WHERE event_id IS NOT NULL AND event_id NOT IN (SELECT event_id FROM Events);
    DELETE FROM Media
     WHERE user_id NOT IN (SELECT user_id FROM Users);
";

fn legacy_name(table: &str) -> String {
    format!("legacy_{}", table)
}

fn table_sql(conn: &Connection, table: &str) -> Result<Option<String>> {
    conn.query_row(
        "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [table],
        |row| row.get(0),
    )
    .optional()
    .map_err(from_rusqlite)
}

fn column_type(conn: &Connection, table: &str, column: &str) -> Result<Option<String>> {
    conn.query_row(
        "SELECT type FROM pragma_table_info(?1) WHERE name = ?2",
        [table, column],
        |row| row.get(0),
    )
    .optional()
    .map_err(from_rusqlite)
}

fn columns(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT name FROM pragma_table_info(?1)")
        .map_err(from_rusqlite)?;
    let names = stmt
        .query_map([table], |row| row.get(0))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<String>, _>>()
        .map_err(from_rusqlite)?;
    Ok(names)
}

/// Whether the database holds tables in the app's pre-versioning layout
pub(crate) fn is_legacy_layout(conn: &Connection) -> Result<bool> {
    let media_without_audio = table_sql(conn, "Media")?
        .map(|sql| !sql.contains("'audio'"))
        .unwrap_or(false);
    if media_without_audio {
        return Ok(true);
    }
    for table in ["Reviews", "Media"] {
        if let Some(declared) = column_type(conn, table, "timestamp")? {
            if declared.eq_ignore_ascii_case("DATETIME") {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Fail unless every version-1 table and column is present
pub(crate) fn verify_v1_layout(conn: &Connection) -> Result<()> {
    for (table, expected) in V1_TABLES {
        let present = columns(conn, table)?;
        let missing: Vec<&str> = expected
            .iter()
            .copied()
            .filter(|c| !present.iter().any(|p| p == c))
            .collect();
        if !missing.is_empty() {
            return Err(ExError::new(ExErrorKind::StorageUnavailable)
                .with_op("verify_layout")
                .with_entity_id(table)
                .with_message(format!("missing columns: {}", missing.join(", "))));
        }
    }
    Ok(())
}

/// Rebuild a legacy database into the layout created by `v1_sql`
///
/// Runs inside the step transaction; the caller must have turned
/// `foreign_keys` off, since renaming and dropping would otherwise cascade.
pub(crate) fn adopt_legacy(tx: &Transaction<'_>, v1_sql: &str) -> Result<()> {
    let mut present = Vec::new();
    for (table, _) in V1_TABLES {
        if table_sql(tx, table)?.is_some() {
            tx.execute_batch(&format!("ALTER TABLE {} RENAME TO {}", table, legacy_name(table)))
                .map_err(from_rusqlite)?;
            present.push(*table);
        }
    }

    tx.execute_batch(v1_sql).map_err(from_rusqlite)?;

    for (table, cols) in V1_TABLES {
        if !present.contains(table) {
            continue;
        }
        let select: Vec<&str> = cols
            .iter()
            .map(|c| if *c == "timestamp" { TIMESTAMP_SECONDS } else { *c })
            .collect();
        let copied = tx
            .execute(
                &format!(
                    "INSERT INTO {} ({}) SELECT {} FROM {}",
                    table,
                    cols.join(", "),
                    select.join(", "),
                    legacy_name(table)
                ),
                [],
            )
            .map_err(|e| from_rusqlite(e).with_entity_id(table))?;
        tracing::debug!(table = *table, rows = copied, "copied legacy rows");
    }

    for table in &present {
        tx.execute_batch(&format!("DROP TABLE {}", legacy_name(table)))
            .map_err(from_rusqlite)?;
    }

    tx.execute_batch(ORPHAN_CLEANUP).map_err(from_rusqlite)?;

    let mut check = tx.prepare("PRAGMA foreign_key_check").map_err(from_rusqlite)?;
    let dangling = check
        .query_map([], |_| Ok(()))
        .map_err(from_rusqlite)?
        .count();
    if dangling > 0 {
        return Err(ExError::new(ExErrorKind::StorageUnavailable)
            .with_op("adopt_legacy")
            .with_message(format!("{} rows reference missing records", dangling)));
    }
    Ok(())
}

/// Run `body` with foreign key enforcement off, restoring the previous setting
pub(crate) fn with_foreign_keys_off<T>(
    conn: &mut Connection,
    body: impl FnOnce(&mut Connection) -> Result<T>,
) -> Result<T> {
    let enabled: bool = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .map_err(from_rusqlite)?;
    conn.execute_batch("PRAGMA foreign_keys = OFF")
        .map_err(from_rusqlite)?;

    let result = body(conn);

    if enabled {
        conn.execute_batch("PRAGMA foreign_keys = ON")
            .map_err(from_rusqlite)?;
    }
    result
}
