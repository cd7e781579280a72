//! Embedded SQL migrations
//!
//! Steps are compiled in with `include_str!`. Versions start at 1 and are
//! contiguous. A step may only add; it never drops or renames what an
//! earlier version introduced.

/// One schema step
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: u32,
    pub id: &'static str,
    pub sql: &'static str,
    /// `(table, column)` for steps that only add a column
    pub adds_column: Option<(&'static str, &'static str)>,
}

/// Schema version this build writes
pub const LATEST_VERSION: u32 = 2;

/// All embedded migrations in version order
pub fn get_migrations() -> &'static [Migration] {
    const MIGRATIONS: &[Migration] = &[
        Migration {
            version: 1,
            id: "001_initial_schema",
            sql: include_str!("../../migrations/001_initial_schema.sql"),
            adds_column: None,
        },
        Migration {
            version: 2,
            id: "002_profile_image_path",
            sql: include_str!("../../migrations/002_profile_image_path.sql"),
            adds_column: Some(("Users", "profile_image_path")),
        },
    ];
    MIGRATIONS
}
