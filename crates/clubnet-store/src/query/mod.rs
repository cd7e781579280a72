//! Query composer
//!
//! Each builder renders one SQL statement with a fixed projection, so every
//! row it yields maps to a complete record with its aggregates present.
//! Aggregates come from `LEFT JOIN` + `GROUP BY`: parents without children
//! are returned with zero counts rather than dropped. Ordering is always
//! stated explicitly.
//!
//! Filters are collected as SQL fragments with anonymous `?` placeholders and
//! a parallel list of bound values, appended in the same order.

mod club_query;
mod event_query;

pub use club_query::{map_club_row, ClubQuery};
pub use event_query::{map_event_row, EventQuery, UPCOMING_LIMIT};

use clubnet_core::errors::ModelError;
use rusqlite::types::{Type, Value, ValueRef};

/// Filter fragments and their bound values
#[derive(Debug, Clone, Default)]
pub(crate) struct Filters {
    clauses: Vec<String>,
    params: Vec<Value>,
}

impl Filters {
    pub(crate) fn push(&mut self, clause: impl Into<String>, params: impl IntoIterator<Item = Value>) {
        self.clauses.push(clause.into());
        self.params.extend(params);
    }

    /// `WHERE a AND b ...`, or nothing
    pub(crate) fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.clauses.join(" AND "))
        }
    }

    pub(crate) fn params(&self) -> &[Value] {
        &self.params
    }
}

/// Substring pattern for `LIKE ... ESCAPE '\'`, with the input's own
/// wildcards matched literally
pub fn contains_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Parse a text column, reporting failures as a column conversion error
pub(crate) fn parse_column<T>(
    idx: usize,
    text: &str,
    parse: impl FnOnce(&str) -> Result<T, ModelError>,
) -> rusqlite::Result<T> {
    parse(text).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Read a timestamp column as UTC
///
/// Accepts Unix seconds, and the `YYYY-MM-DD HH:MM:SS` text that SQLite's
/// `CURRENT_TIMESTAMP` writes.
pub(crate) fn timestamp_column(
    row: &rusqlite::Row<'_>,
    idx: usize,
) -> rusqlite::Result<chrono::DateTime<chrono::Utc>> {
    let (parsed, ty, raw) = match row.get_ref(idx)? {
        ValueRef::Integer(secs) => (
            chrono::DateTime::from_timestamp(secs, 0),
            Type::Integer,
            secs.to_string(),
        ),
        ValueRef::Text(bytes) => {
            let text = String::from_utf8_lossy(bytes).into_owned();
            let parsed = parse_sqlite_datetime(&text);
            (parsed, Type::Text, text)
        }
        other => return Err(rusqlite::Error::InvalidColumnType(
            idx,
            "timestamp".to_string(),
            other.data_type(),
        )),
    };
    parsed.ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            ty,
            Box::new(ModelError::InvalidTemporal {
                kind: "timestamp",
                value: raw,
            }),
        )
    })
}

fn parse_sqlite_datetime(text: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| chrono::NaiveDateTime::parse_from_str(text.trim(), fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("run"), "%run%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b\\c"), "%a\\_b\\\\c%");
    }

    #[test]
    fn test_timestamp_column_reads_seconds_and_sqlite_text() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let read = |sql: &str| {
            conn.query_row(sql, [], |row| timestamp_column(row, 0))
        };

        let from_secs = read("SELECT 1700000000").unwrap();
        assert_eq!(from_secs.timestamp(), 1_700_000_000);

        let from_text = read("SELECT '2023-11-14 22:13:20'").unwrap();
        assert_eq!(from_text, from_secs);

        assert!(read("SELECT 'yesterday'").is_err());
        assert!(read("SELECT NULL").is_err());
    }

    #[test]
    fn test_where_clause_joins_filters() {
        let mut filters = Filters::default();
        assert_eq!(filters.where_clause(), "");
        filters.push("a = ?", [Value::Integer(1)]);
        filters.push("b = ?", [Value::Text("x".into())]);
        assert_eq!(filters.where_clause(), "WHERE a = ? AND b = ?");
        assert_eq!(filters.params().len(), 2);
    }
}
