//! Friend commands

use clap::{Args, Subcommand};
use clubnet_engine::commands::social;
use serde_json::json;

use super::{print_json, Credentials};
use crate::config::GlobalArgs;

#[derive(Debug, Args)]
pub struct FriendArgs {
    #[command(subcommand)]
    pub command: FriendCommand,
}

#[derive(Debug, Subcommand)]
pub enum FriendCommand {
    /// Send a friend request
    Request {
        #[command(flatten)]
        credentials: Credentials,
        /// User id to ask
        #[arg(long)]
        to: i64,
    },
    /// Accept a pending request
    Accept {
        #[command(flatten)]
        credentials: Credentials,
        /// User id who sent the request
        #[arg(long)]
        from: i64,
    },
    /// List friends, or incoming requests with --pending
    List {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(long)]
        pending: bool,
    },
}

pub fn execute(args: FriendArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let repo = global.open_repo()?;
    match args.command {
        FriendCommand::Request { credentials, to } => {
            let session = credentials.login(&repo)?;
            social::send_friend_request(&repo, &session, to)?;
            print_json(&json!({ "from": session.user_id(), "to": to, "status": "pending" }))
        }
        FriendCommand::Accept { credentials, from } => {
            let session = credentials.login(&repo)?;
            social::accept_friend_request(&repo, &session, from)?;
            print_json(&json!({ "from": from, "to": session.user_id(), "status": "accepted" }))
        }
        FriendCommand::List {
            credentials,
            pending,
        } => {
            let session = credentials.login(&repo)?;
            if pending {
                print_json(&social::pending_requests(&repo, &session)?)
            } else {
                print_json(&social::friends(&repo, &session)?)
            }
        }
    }
}
