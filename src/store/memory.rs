//! In-process build store
//!
//! Mirrors the DynamoDB table semantics for local runs and tests: upsert by
//! (`username`, `reponame`, `build_num`) and begins-with queries on
//! `queued_at`. Records are held as DynamoDB items, so numbers read back
//! the same way they do from the real table.

use super::conversions::{item_to_record, record_to_item};
use super::BuildStore;
use crate::error::{Error, Result};
use crate::types::{
    queued_at, BuildRecord, JsonValue, FIELD_BUILD_NUM, FIELD_REPONAME, FIELD_USERNAME,
};
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

const TABLE_NAME: &str = "memory";

static NULL: JsonValue = JsonValue::Null;

type Item = HashMap<String, AttributeValue>;

/// In-memory build table
#[derive(Debug, Default)]
pub struct MemoryBuildStore {
    items: RwLock<BTreeMap<String, Item>>,
}

impl MemoryBuildStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// Snapshot of all records in key order
    pub async fn records(&self) -> Vec<BuildRecord> {
        self.items.read().await.values().map(item_to_record).collect()
    }

    fn key_of(record: &BuildRecord) -> Result<String> {
        let key = [
            key_part(record, FIELD_USERNAME)?,
            record.get(FIELD_REPONAME).unwrap_or(&NULL),
            key_part(record, FIELD_BUILD_NUM)?,
        ];
        Ok(serde_json::to_string(&key)?)
    }
}

fn key_part<'a>(record: &'a BuildRecord, field: &str) -> Result<&'a JsonValue> {
    record
        .get(field)
        .filter(|v| !v.is_null())
        .ok_or_else(|| Error::store_write(TABLE_NAME, format!("missing key attribute '{field}'")))
}

#[async_trait]
impl BuildStore for MemoryBuildStore {
    async fn put_build(&self, record: &BuildRecord) -> Result<()> {
        let key = Self::key_of(record)?;
        self.items
            .write()
            .await
            .insert(key, record_to_item(record));
        Ok(())
    }

    async fn query_window(&self, owner: &str, prefix: &str) -> Result<Vec<BuildRecord>> {
        let items = self.items.read().await;
        let mut matched: Vec<BuildRecord> = items
            .values()
            .map(item_to_record)
            .filter(|r| r.get(FIELD_USERNAME).and_then(JsonValue::as_str) == Some(owner))
            .filter(|r| queued_at(r).is_some_and(|q| q.starts_with(prefix)))
            .collect();
        matched.sort_by(|a, b| queued_at(a).cmp(&queued_at(b)));
        Ok(matched)
    }
}
