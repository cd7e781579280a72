//! Review commands

use clap::{Args, Subcommand};
use clubnet_core::model::{MediaType, NewReview};
use clubnet_engine::commands::reviews;
use serde_json::json;

use super::{print_json, Credentials};
use crate::config::GlobalArgs;

#[derive(Debug, Args)]
pub struct ReviewArgs {
    #[command(subcommand)]
    pub command: ReviewCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReviewCommand {
    /// Review a club as the logged-in user
    Add(AddReviewArgs),
    /// Reviews of a club, newest first
    List { club: i64 },
}

#[derive(Debug, Args)]
pub struct AddReviewArgs {
    #[command(flatten)]
    pub credentials: Credentials,

    #[arg(long)]
    pub club: i64,

    /// 1 to 5
    #[arg(long)]
    pub rating: i64,

    #[arg(long)]
    pub text: Option<String>,

    #[arg(long)]
    pub media_url: Option<String>,

    /// photo, video or audio; also stores the media reference
    #[arg(long, requires = "media_url")]
    pub media_type: Option<String>,
}

pub fn execute(args: ReviewArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let mut repo = global.open_repo()?;
    match args.command {
        ReviewCommand::Add(add) => {
            let session = add.credentials.login(&repo)?;
            let media_type = add
                .media_type
                .as_deref()
                .map(str::parse::<MediaType>)
                .transpose()?;
            let review = NewReview {
                club_id: add.club,
                user_id: session.user_id(),
                rating: add.rating,
                text: add.text,
                media_url: add.media_url,
            };
            let id = reviews::add_review(&mut repo, &session, &review, media_type)?;
            print_json(&json!({ "review_id": id }))
        }
        ReviewCommand::List { club } => print_json(&reviews::club_reviews(&repo, club)?),
    }
}
