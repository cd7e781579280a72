//! Event commands

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use clubnet_core::model::event::{parse_date, parse_time};
use clubnet_core::model::{AttendanceStatus, NewEvent};
use clubnet_engine::commands::events;
use serde_json::json;

use super::{print_json, Credentials};
use crate::config::GlobalArgs;

#[derive(Debug, Args)]
pub struct EventArgs {
    #[command(subcommand)]
    pub command: EventCommand,
}

#[derive(Debug, Subcommand)]
pub enum EventCommand {
    /// Schedule an event hosted by the logged-in user
    Create(CreateEventArgs),
    /// Next events from today (or --from)
    Upcoming {
        /// YYYY-MM-DD
        #[arg(long)]
        from: Option<String>,
    },
    /// Set attendance for the logged-in user
    Join(JoinArgs),
    /// Remove the logged-in user's attendance
    Leave(LeaveArgs),
}

#[derive(Debug, Args)]
pub struct CreateEventArgs {
    #[command(flatten)]
    pub credentials: Credentials,

    #[arg(long)]
    pub club: i64,

    #[arg(long)]
    pub title: String,

    /// YYYY-MM-DD
    #[arg(long)]
    pub date: String,

    /// HH:MM
    #[arg(long)]
    pub time: String,

    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub long: f64,

    #[arg(long, default_value_t = 0)]
    pub max_participants: i64,

    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Debug, Args)]
pub struct JoinArgs {
    #[command(flatten)]
    pub credentials: Credentials,

    pub event: i64,

    /// joined, interested or completed
    #[arg(long, default_value = "joined")]
    pub status: String,
}

#[derive(Debug, Args)]
pub struct LeaveArgs {
    #[command(flatten)]
    pub credentials: Credentials,

    pub event: i64,
}

fn parse_day(text: &str) -> anyhow::Result<NaiveDate> {
    parse_date(text).with_context(|| "expected a date as YYYY-MM-DD")
}

pub fn execute(args: EventArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let repo = global.open_repo()?;
    match args.command {
        EventCommand::Create(create) => {
            let session = create.credentials.login(&repo)?;
            let event = NewEvent {
                club_id: create.club,
                host_id: session.user_id(),
                title: create.title,
                description: create.description,
                date: parse_day(&create.date)?,
                time: parse_time(&create.time).context("expected a time as HH:MM")?,
                latitude: create.lat,
                longitude: create.long,
                max_participants: create.max_participants,
            };
            let id = events::create_event(&repo, &session, &event)?;
            print_json(&json!({ "event_id": id }))
        }
        EventCommand::Upcoming { from } => {
            let from = from.as_deref().map(parse_day).transpose()?;
            print_json(&events::upcoming_events(&repo, from)?)
        }
        EventCommand::Join(join) => {
            let session = join.credentials.login(&repo)?;
            let status: AttendanceStatus = join.status.parse()?;
            print_json(&events::join_event(&repo, &session, join.event, status)?)
        }
        EventCommand::Leave(leave) => {
            let session = leave.credentials.login(&repo)?;
            let left = events::leave_event(&repo, &session, leave.event)?;
            print_json(&json!({ "event_id": leave.event, "left": left }))
        }
    }
}
