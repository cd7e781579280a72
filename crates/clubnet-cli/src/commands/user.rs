//! Account commands

use clap::{Args, Subcommand};
use clubnet_core::model::NewUser;
use clubnet_core_types::Sensitive;
use clubnet_engine::commands::accounts;
use serde_json::json;

use super::{print_json, Credentials};
use crate::config::GlobalArgs;

#[derive(Debug, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Register a new account
    Register(RegisterArgs),
    /// Check credentials and show the account
    Login(Credentials),
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long, env = "CLUBNET_PASSWORD", hide_env_values = true)]
    pub password: Sensitive<String>,

    #[arg(long)]
    pub bio: Option<String>,

    #[arg(long)]
    pub location: Option<String>,
}

pub fn execute(args: UserArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let repo = global.open_repo()?;
    match args.command {
        UserCommand::Register(reg) => {
            let mut user = NewUser::new(reg.name, reg.email, reg.password);
            user.bio = reg.bio;
            user.location = reg.location;
            let id = accounts::register(&repo, &user)?;
            print_json(&json!({ "user_id": id }))
        }
        UserCommand::Login(creds) => {
            let session = creds.login(&repo)?;
            let user = accounts::current_user(&repo, &session)?;
            print_json(&json!({
                "session": session.token(),
                "logged_in_at": session.created_at(),
                "user": user,
            }))?;
            accounts::logout(session);
            Ok(())
        }
    }
}
