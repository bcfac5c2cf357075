mod commands;
mod render;
mod utils;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rentcal_core::date_range::parse_date;
use rentcal_core::{BulkIntent, Month, ReservationStatus};

use commands::ListingContext;

#[derive(Parser)]
#[command(name = "rentcal")]
#[command(about = "Manage a rental listing's availability calendar")]
struct Cli {
    /// Listing to operate on (defaults to default_listing from config)
    #[arg(short, long, global = true)]
    listing: Option<String>,

    /// Override the API base URL from config
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month of availability
    Month {
        /// Month to show (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<Month>,
    },
    /// Show the status of a single day
    Status {
        /// Day to check (YYYY-MM-DD)
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },
    /// Make a day or range of days unavailable
    Block {
        /// First day (YYYY-MM-DD)
        #[arg(value_parser = parse_date)]
        from: NaiveDate,

        /// Last day, inclusive (defaults to `from`)
        #[arg(value_parser = parse_date)]
        to: Option<NaiveDate>,
    },
    /// Make a day or range of days available again
    Unblock {
        /// First day (YYYY-MM-DD)
        #[arg(value_parser = parse_date)]
        from: NaiveDate,

        /// Last day, inclusive (defaults to `from`)
        #[arg(value_parser = parse_date)]
        to: Option<NaiveDate>,
    },
    /// Flip a single day between blocked and available
    Toggle {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },
    /// List the reservations covering a day, whatever their status
    Reservations {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },
    /// Change the status of a reservation on a day
    SetStatus {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,

        reservation_id: String,

        /// pending, confirmed, cancelled or completed
        status: ReservationStatus,
    },
    /// Show the config file and its settings
    Config {
        /// Save this listing as the default
        #[arg(long)]
        set_listing: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::logging::init_tracing(cli.verbose)?;

    let ctx = || ListingContext::load(cli.listing.as_deref(), cli.api_url.as_deref());

    match cli.command {
        Commands::Month { month } => {
            let month = month.unwrap_or_else(|| Month::containing(chrono::Local::now().date_naive()));
            commands::month::run(ctx()?, month).await
        }
        Commands::Status { date } => commands::status::run(ctx()?, date).await,
        Commands::Block { from, to } => commands::bulk::run(ctx()?, from, to, BulkIntent::Block).await,
        Commands::Unblock { from, to } => {
            commands::bulk::run(ctx()?, from, to, BulkIntent::Unblock).await
        }
        Commands::Toggle { date } => commands::toggle::run(ctx()?, date).await,
        Commands::Reservations { date } => commands::reservations::run(ctx()?, date).await,
        Commands::SetStatus {
            date,
            reservation_id,
            status,
        } => commands::set_status::run(ctx()?, date, &reservation_id, status).await,
        Commands::Config { set_listing } => commands::config::run(set_listing),
    }
}
