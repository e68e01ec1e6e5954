//! CLI module
//!
//! # Commands
//!
//! - `ingest` - Pull recent CircleCI builds into DynamoDB
//! - `export` - Upload the previous hour of builds to object storage

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
