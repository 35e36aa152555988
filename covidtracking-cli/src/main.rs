//! Command-line client for the Covid19Tracking API.

mod commands;
mod error;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use covidtracking::{logging, Config, Tracker};

use crate::error::CliError;

#[derive(Debug, Parser)]
#[command(name = "covidtracking", version, about = "COVID-19 statistics from the Narrativa tracking API")]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List known countries
    Countries,
    /// List the regions of a country
    Regions {
        /// Country id (e.g. "spain")
        country: String,
    },
    /// List the subregions of a region
    SubRegions {
        country: String,
        region: String,
    },
    /// Fetch observations for a country, region or subregion
    Data {
        country: String,
        region: Option<String>,
        sub_region: Option<String>,
        /// First day of the range
        #[arg(long)]
        date_from: NaiveDate,
        /// Last day of the range (defaults to the first day)
        #[arg(long)]
        date_to: Option<NaiveDate>,
        /// Print observations as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the confirmed-case delta for a subregion on one day
    NewCases {
        country: String,
        region: String,
        sub_region: String,
        /// Day to query (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(if cli.verbose { "debug" } else { "info" });

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = Config::load()?;
    tracing::debug!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "Configuration loaded");
    let mut tracker = Tracker::with_config(&config)?;

    match cli.command {
        Command::Countries => commands::countries(&mut tracker),
        Command::Regions { country } => commands::regions(&mut tracker, &country),
        Command::SubRegions { country, region } => {
            commands::sub_regions(&mut tracker, &country, &region)
        }
        Command::Data {
            country,
            region,
            sub_region,
            date_from,
            date_to,
            json,
        } => commands::data(
            &mut tracker,
            &country,
            region.as_deref(),
            sub_region.as_deref(),
            date_from,
            date_to,
            json,
        ),
        Command::NewCases {
            country,
            region,
            sub_region,
            date,
        } => commands::new_cases(&mut tracker, &country, &region, &sub_region, date),
    }
}
