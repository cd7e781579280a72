//! Club commands

use clap::{Args, Subcommand};
use clubnet_core::model::NewClub;
use clubnet_engine::commands::clubs;
use serde_json::json;

use super::{print_json, Credentials};
use crate::config::GlobalArgs;

#[derive(Debug, Args)]
pub struct ClubArgs {
    #[command(subcommand)]
    pub command: ClubCommand,
}

#[derive(Debug, Subcommand)]
pub enum ClubCommand {
    /// Create a club owned by the logged-in user
    Create(CreateClubArgs),
    /// List every club with its rating
    List,
    /// Find clubs by name or sport
    Search { text: String },
    /// Clubs within a radius of a point
    Near(NearArgs),
    /// Show one club
    Show { id: i64 },
}

#[derive(Debug, Args)]
pub struct CreateClubArgs {
    #[command(flatten)]
    pub credentials: Credentials,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub sport: String,

    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub long: f64,

    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Debug, Args)]
pub struct NearArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub long: f64,

    /// Radius in km
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    pub radius: f64,
}

pub fn execute(args: ClubArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let repo = global.open_repo()?;
    match args.command {
        ClubCommand::Create(create) => {
            let session = create.credentials.login(&repo)?;
            let mut club = NewClub::new(
                create.name,
                create.sport,
                create.lat,
                create.long,
                session.user_id(),
            );
            club.description = create.description;
            let id = clubs::create_club(&repo, &session, &club)?;
            print_json(&json!({ "club_id": id }))
        }
        ClubCommand::List => print_json(&clubs::list_clubs(&repo)?),
        ClubCommand::Search { text } => print_json(&clubs::search_clubs(&repo, &text)?),
        ClubCommand::Near(near) => {
            print_json(&clubs::clubs_near(&repo, near.lat, near.long, near.radius)?)
        }
        ClubCommand::Show { id } => print_json(&clubs::show_club(&repo, id)?),
    }
}
