pub mod club;
pub mod db;
pub mod event;
pub mod friend;
pub mod review;
pub mod user;

use clap::Args;
use clubnet_core::Session;
use clubnet_core_types::Sensitive;
use clubnet_engine::commands::accounts;
use clubnet_store::Repository;
use serde::Serialize;

/// Login for commands acting on behalf of a user
#[derive(Debug, Args)]
pub struct Credentials {
    #[arg(long)]
    pub email: String,

    #[arg(long, env = "CLUBNET_PASSWORD", hide_env_values = true)]
    pub password: Sensitive<String>,
}

impl Credentials {
    pub fn login(&self, repo: &Repository) -> anyhow::Result<Session> {
        Ok(accounts::login(repo, &self.email, &self.password)?)
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
