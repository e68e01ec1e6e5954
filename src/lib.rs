//! # cibuild-etl
//!
//! Two batch jobs that move CircleCI build records into an analytics
//! bucket.
//!
//! - **ingest**: fetch recent builds from the CircleCI API, rewrite empty
//!   strings to `null`, and upsert each build into a DynamoDB table.
//! - **export**: query the previous UTC hour of builds for one organization
//!   and upload them as newline-delimited JSON under a
//!   `year=/month=/day=` partitioned key.
//!
//! ## Architecture
//!
//! ```text
//!  CircleCI API ──ingest──▶ DynamoDB ──export──▶ S3 (NDJSON)
//!
//! ┌───────────┬───────────┬───────────┬───────────┬───────────┐
//! │ circleci  │ normalize │   store   │  window   │  output   │
//! ├───────────┼───────────┼───────────┼───────────┼───────────┤
//! │ endpoint  │ ""→null   │ DynamoDB  │ UTC prefix│ NDJSON    │
//! │ Basic auth│ recursive │ memory    │ local key │ S3 / file │
//! └───────────┴───────────┴───────────┴───────────┴───────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cibuild_etl::config::ExportConfig;
//! use cibuild_etl::pipeline::run_export_job;
//!
//! #[tokio::main]
//! async fn main() -> cibuild_etl::Result<()> {
//!     let config = ExportConfig::from_env()?;
//!     let summary = run_export_job(&config, chrono::Utc::now()).await?;
//!     println!("{} builds -> {}", summary.matched, summary.object_url);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Environment configuration
pub mod config;

/// Empty-string normalization
pub mod normalize;

/// HTTP client
pub mod http;

/// CircleCI recent-builds source
pub mod circleci;

/// Build record storage
pub mod store;

/// Export time window and object naming
pub mod window;

/// NDJSON staging and object storage upload
pub mod output;

/// Ingest and export jobs
pub mod pipeline;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
