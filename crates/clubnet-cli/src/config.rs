//! Global options shared by every subcommand

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use clubnet_core::logging_facility::Profile;
use clubnet_store::{Repository, StoreConfig};

pub const DEFAULT_DB_PATH: &str = ".clubnet/clubnet.db";

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// SQLite database file
    #[arg(long, global = true, env = "CLUBNET_DB", default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,

    /// Log output: pretty or json
    #[arg(long, global = true, env = "CLUBNET_LOG_FORMAT", default_value = "pretty")]
    pub log_format: Profile,
}

impl GlobalArgs {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::file(&self.db)
    }

    /// Open the configured database, migrating it if needed
    pub fn open_repo(&self) -> anyhow::Result<Repository> {
        tracing::debug!(db = %self.db.display(), "opening database");
        Repository::open(&self.store_config())
            .with_context(|| format!("cannot open database {}", self.db.display()))
    }
}
