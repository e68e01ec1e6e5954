//! Build record storage
//!
//! ## Table Schema
//!
//! ```text
//! Table: configurable (DYNAMODB_TABLE_NAME)
//!
//! Items: one normalized CircleCI build record each, all provider fields kept.
//!
//! Secondary index (default "sort_queued_at"):
//!   - username  (String, Partition Key): organization / owner
//!   - queued_at (String, Sort Key): ISO-8601 UTC, e.g. "2019-07-24T08:38:39.995Z"
//! ```
//!
//! The export job reads one UTC hour with
//! `username = :owner AND begins_with(queued_at, "YYYY-MM-DDTHH")`.

mod conversions;
mod dynamodb;
mod memory;

pub use conversions::{attr_to_json, item_to_record, json_to_attr, number_to_json, record_to_item};
pub use dynamodb::DynamoBuildStore;
pub use memory::MemoryBuildStore;

use crate::error::Result;
use crate::types::BuildRecord;
use async_trait::async_trait;

/// Key-value table holding build records
#[async_trait]
pub trait BuildStore: Send + Sync {
    /// Insert or replace a record; the last write for a key wins
    async fn put_build(&self, record: &BuildRecord) -> Result<()>;

    /// All records of `owner` whose `queued_at` starts with `prefix`,
    /// in `queued_at` order
    async fn query_window(&self, owner: &str, prefix: &str) -> Result<Vec<BuildRecord>>;
}
