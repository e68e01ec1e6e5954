//! Job pipelines
//!
//! Both jobs are linear: fetch/query, transform, persist/upload. Any
//! failure is logged where it happens and returned; the caller exits.
//!
//! The `*_handler` functions match a function-runtime calling convention
//! (trigger event + invocation context). The event is ignored; the context
//! only tags log lines with the invoker's request id.

mod export;
mod ingest;

pub use export::{run_export, ExportSummary};
pub use ingest::{run_ingest, IngestSummary};

use crate::circleci::CircleCiSource;
use crate::config::{ExportConfig, IngestConfig};
use crate::error::Result;
use crate::output::ObjectDestination;
use crate::store::DynamoBuildStore;
use crate::types::JsonValue;
use chrono::{DateTime, Utc};
use tracing::{error, info};

/// Invocation context handed over by the scheduler
#[derive(Debug, Clone, Default)]
pub struct JobContext {
    /// Request id assigned by the invoker, if any
    pub request_id: Option<String>,
}

/// Run the ingest job against CircleCI and DynamoDB
pub async fn run_ingest_job(config: &IngestConfig) -> Result<IngestSummary> {
    info!("start");
    let source = CircleCiSource::new(&config.circleci)
        .inspect_err(|e| error!("Failed to set up CircleCI client: {e}"))?;
    let store = DynamoBuildStore::connect(&config.store).await;

    let summary = run_ingest(&source, &store).await?;
    info!("end: {summary:?}");
    Ok(summary)
}

/// Run the export job against DynamoDB and the configured destination
pub async fn run_export_job(config: &ExportConfig, now: DateTime<Utc>) -> Result<ExportSummary> {
    info!("start");
    let destination = ObjectDestination::parse(&config.destination)
        .inspect_err(|e| error!("Invalid destination '{}': {e}", config.destination))?;
    let store = DynamoBuildStore::connect(&config.store).await;

    let summary = run_export(config, &store, &destination, now).await?;
    info!("end: {} records exported to {}", summary.matched, summary.object_url);
    Ok(summary)
}

/// Entry point for the ingest job
pub async fn ingest_handler(_event: JsonValue, context: JobContext) -> Result<IngestSummary> {
    info!(request_id = context.request_id.as_deref(), "ingest invoked");
    handle_ingest(|key| std::env::var(key).ok()).await
}

/// Entry point for the export job
pub async fn export_handler(_event: JsonValue, context: JobContext) -> Result<ExportSummary> {
    info!(request_id = context.request_id.as_deref(), "export invoked");
    handle_export(|key| std::env::var(key).ok(), Utc::now()).await
}

async fn handle_ingest<F>(lookup: F) -> Result<IngestSummary>
where
    F: Fn(&str) -> Option<String>,
{
    let config = IngestConfig::from_lookup(lookup).inspect_err(|e| error!("{e}"))?;
    run_ingest_job(&config).await
}

async fn handle_export<F>(lookup: F, now: DateTime<Utc>) -> Result<ExportSummary>
where
    F: Fn(&str) -> Option<String>,
{
    let config = ExportConfig::from_lookup(lookup).inspect_err(|e| error!("{e}"))?;
    run_export_job(&config, now).await
}
