//! Export: key-value store → object storage

use crate::config::ExportConfig;
use crate::error::Result;
use crate::output::{ObjectDestination, ScratchFile};
use crate::store::BuildStore;
use crate::window::ExportWindow;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::{error, info};

/// Result of one export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Records in the exported hour
    pub matched: usize,
    /// Object key, e.g. `year=2019/month=07/day=24/2019072417.json`
    pub object_key: String,
    /// Full URL of the uploaded object
    pub object_url: String,
    /// Local copy, when configured to keep it
    pub kept_file: Option<PathBuf>,
}

/// Export the hour before `now` as NDJSON.
///
/// An empty hour still uploads an empty file so downstream partitions exist.
pub async fn run_export(
    config: &ExportConfig,
    store: &dyn BuildStore,
    destination: &ObjectDestination,
    now: DateTime<Utc>,
) -> Result<ExportSummary> {
    let window = ExportWindow::previous_hour(now, config.utc_offset);
    info!("one_hour_ago_time: {}", window.start());
    info!("one_hour_ago_time_local: {}", window.local_start());

    let prefix = window.query_prefix();
    let object_key = window.object_key();
    info!("query prefix: {prefix}, object key: {object_key}");

    let records = store
        .query_window(&config.organization, &prefix)
        .await
        .inspect_err(|e| error!("Failed to query builds for {}: {e}", config.organization))?;
    info!("Query succeeded: {} records", records.len());

    let mut scratch = ScratchFile::create(&config.scratch_dir, &window.file_name())
        .inspect_err(|e| error!("Failed to create scratch file: {e}"))?;
    scratch
        .write_records(&records)
        .inspect_err(|e| error!("Failed to write {}: {e}", scratch.path().display()))?;

    let object_url = destination
        .upload_file(scratch.path(), &object_key)
        .await
        .inspect_err(|e| error!("Upload failed: {e}"))?;
    info!("Upload succeeded: {object_url}");

    let kept_file = if config.keep_local_file {
        let path = scratch.keep()?;
        info!("Kept local export at {}", path.display());
        Some(path)
    } else {
        None
    };

    Ok(ExportSummary {
        matched: records.len(),
        object_key,
        object_url,
        kept_file,
    })
}
