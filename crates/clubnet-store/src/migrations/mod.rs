//! Migration framework
//!
//! Provides:
//! - Versioned steps applied in increasing order, each in its own transaction
//! - SHA-256 checksums recorded per step and verified on every open
//! - Idempotent re-runs (applied steps are skipped; column-adding steps are
//!   skipped when the column is already present)
//! - Adoption of tables the mobile app created before versioning existed

mod checksums;
mod embedded;
mod layout;
mod runner;

pub use embedded::{get_migrations, Migration, LATEST_VERSION};
pub use runner::{apply_migrations, apply_migrations_through, current_version};
