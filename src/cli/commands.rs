//! CLI commands and argument parsing

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

/// CircleCI build ingest and export jobs
#[derive(Parser, Debug)]
#[command(name = "cibuild-etl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch recent builds from CircleCI and store them in DynamoDB
    Ingest,

    /// Export the previous hour of builds to object storage as NDJSON
    Export {
        /// Treat this instant as "now" (RFC 3339), to re-export a past hour
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
}
