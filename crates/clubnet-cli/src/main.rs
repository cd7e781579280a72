//! ClubNet CLI
//!
//! Command-line front end for the club data layer

use clap::{Parser, Subcommand};
use clubnet_core::logging_facility;

mod commands;
mod config;

#[derive(Debug, Parser)]
#[command(name = "clubnet")]
#[command(about = "ClubNet - clubs, events, reviews and friends", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: config::GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database setup
    Db(commands::db::DbArgs),
    /// Accounts
    User(commands::user::UserArgs),
    /// Clubs
    Club(commands::club::ClubArgs),
    /// Events and attendance
    Event(commands::event::EventArgs),
    /// Club reviews
    Review(commands::review::ReviewArgs),
    /// Friend requests
    Friend(commands::friend::FriendArgs),
}

fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    logging_facility::init(cli.global.log_format);

    let result = match cli.command {
        Commands::Db(args) => commands::db::execute(args, &cli.global),
        Commands::User(args) => commands::user::execute(args, &cli.global),
        Commands::Club(args) => commands::club::execute(args, &cli.global),
        Commands::Event(args) => commands::event::execute(args, &cli.global),
        Commands::Review(args) => commands::review::execute(args, &cli.global),
        Commands::Friend(args) => commands::friend::execute(args, &cli.global),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
