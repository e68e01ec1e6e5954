//! Ingest: CI provider → key-value store

use crate::circleci::BuildSource;
use crate::error::Result;
use crate::normalize::normalize_value;
use crate::store::BuildStore;
use crate::types::{queued_at, FIELD_BUILD_NUM};
use tracing::{debug, error, info};

/// Counts from one ingest run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Records returned by the provider
    pub fetched: usize,
    /// Records without `queued_at` (never ran)
    pub skipped: usize,
    /// Records written to the store
    pub written: usize,
}

/// Fetch recent builds, normalize them and upsert each one.
///
/// The first failure ends the run; records already written stay written.
pub async fn run_ingest(source: &dyn BuildSource, store: &dyn BuildStore) -> Result<IngestSummary> {
    info!("build data fetch start");
    let builds = source
        .recent_builds()
        .await
        .inspect_err(|e| error!("Failed to fetch recent builds: {e}"))?;
    info!("build data fetch end: {} records", builds.len());

    let mut summary = IngestSummary {
        fetched: builds.len(),
        ..IngestSummary::default()
    };

    info!("build data put start");
    for build in builds {
        let record =
            normalize_value(build).inspect_err(|e| error!("Rejected build record: {e}"))?;

        if queued_at(&record).is_none() {
            debug!(
                "Skipping build {} without queued_at",
                record.get(FIELD_BUILD_NUM).map_or_else(String::new, ToString::to_string)
            );
            summary.skipped += 1;
            continue;
        }

        debug!("Putting build {:?}", record.get(FIELD_BUILD_NUM));
        store
            .put_build(&record)
            .await
            .inspect_err(|e| error!("Failed to put build record: {e}"))?;
        summary.written += 1;
    }
    info!(
        "build data put end: {} written, {} skipped",
        summary.written, summary.skipped
    );

    Ok(summary)
}
