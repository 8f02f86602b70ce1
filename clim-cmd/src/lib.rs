//! Command implementations for the climate observation CLI.
//!
//! Provides subcommands to serve the HTTP API, build a data file from the
//! CSV sources, and run a single query from the shell.

use clap::Subcommand;
use std::path::PathBuf;

pub mod import;
pub mod query;
pub mod serve;

pub use query::QueryCommand;

/// Data file read when no `--database` is given.
pub const DEFAULT_DATABASE: &str = "Resources/hawaii.sqlite";

#[derive(Subcommand)]
pub enum Command {
    /// Serve the read-only JSON API
    Serve {
        /// SQLite data file (opened read-only)
        #[arg(short = 'd', long, env = "CLIM_DATABASE", default_value = DEFAULT_DATABASE)]
        database: PathBuf,

        /// IP address to bind
        #[arg(long, env = "CLIM_HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to bind
        #[arg(short = 'p', long, env = "CLIM_PORT", default_value_t = clim_api::config::DEFAULT_PORT)]
        port: u16,

        /// Per-request timeout in seconds
        #[arg(long, env = "CLIM_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
        request_timeout_secs: u64,
    },

    /// Build a data file from station and measurement CSV files
    Import {
        /// Stations CSV (`station,name,latitude,longitude,elevation`)
        #[arg(short = 's', long)]
        stations_csv: PathBuf,

        /// Measurements CSV (`station,date,prcp,tobs`)
        #[arg(short = 'm', long)]
        measurements_csv: PathBuf,

        /// Output SQLite file
        #[arg(short = 'd', long, env = "CLIM_DATABASE", default_value = DEFAULT_DATABASE)]
        database: PathBuf,

        /// Replace the output file if it already exists
        #[arg(long)]
        force: bool,
    },

    /// Run one query and print the JSON result
    Query {
        /// SQLite data file (opened read-only)
        #[arg(short = 'd', long, env = "CLIM_DATABASE", default_value = DEFAULT_DATABASE)]
        database: PathBuf,

        #[command(subcommand)]
        query: QueryCommand,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Serve {
            database,
            host,
            port,
            request_timeout_secs,
        } => serve::run_serve(&database, &host, port, request_timeout_secs).await,
        Command::Import {
            stations_csv,
            measurements_csv,
            database,
            force,
        } => import::run_import(&stations_csv, &measurements_csv, &database, force),
        Command::Query { database, query } => query::run_query(&database, &query),
    }
}
