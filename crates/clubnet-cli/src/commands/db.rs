//! Database lifecycle commands

use clap::{Args, Subcommand};
use serde_json::json;

use super::print_json;
use crate::config::GlobalArgs;

#[derive(Debug, Args)]
pub struct DbArgs {
    #[command(subcommand)]
    pub command: DbCommand,
}

#[derive(Debug, Subcommand)]
pub enum DbCommand {
    /// Create the database or bring its schema up to date
    Init,
    /// Print the schema version
    Version,
}

pub fn execute(args: DbArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let mut repo = global.open_repo()?;
    let version = repo.schema_version()?;
    match args.command {
        DbCommand::Init => print_json(&json!({
            "db": global.db.display().to_string(),
            "schema_version": version,
        }))?,
        DbCommand::Version => print_json(&json!({ "schema_version": version }))?,
    }
    repo.close()?;
    Ok(())
}
