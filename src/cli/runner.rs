//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::{ExportConfig, IngestConfig};
use crate::error::Result;
use crate::pipeline::{run_export_job, run_ingest_job};
use chrono::Utc;
use tracing::error;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Ingest => {
                let config = IngestConfig::from_env().inspect_err(|e| error!("{e}"))?;
                run_ingest_job(&config).await?;
            }
            Commands::Export { at } => {
                let config = ExportConfig::from_env().inspect_err(|e| error!("{e}"))?;
                run_export_job(&config, at.unwrap_or_else(Utc::now)).await?;
            }
        }
        Ok(())
    }
}
