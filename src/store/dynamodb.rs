//! DynamoDB-backed build store

use super::conversions::{item_to_record, record_to_item};
use super::BuildStore;
use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::types::{BuildRecord, FIELD_QUEUED_AT, FIELD_USERNAME};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tracing::debug;

const KEY_CONDITION: &str = "#owner = :owner AND begins_with(#queued_at, :prefix)";

/// Build store on a DynamoDB table
#[derive(Clone)]
pub struct DynamoBuildStore {
    client: Client,
    table_name: String,
    index_name: String,
}

impl std::fmt::Debug for DynamoBuildStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoBuildStore")
            .field("table_name", &self.table_name)
            .field("index_name", &self.index_name)
            .finish_non_exhaustive()
    }
}

impl DynamoBuildStore {
    /// Create a store from config, loading AWS credentials from the environment
    pub async fn connect(config: &StoreConfig) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);

        // DynamoDB Local / LocalStack
        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }

        Self::from_client(Client::from_conf(builder.build()), config)
    }

    /// Create from a pre-built client
    pub fn from_client(client: Client, config: &StoreConfig) -> Self {
        Self {
            client,
            table_name: config.table_name.clone(),
            index_name: config.index_name.clone(),
        }
    }
}

#[async_trait]
impl BuildStore for DynamoBuildStore {
    async fn put_build(&self, record: &BuildRecord) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record_to_item(record)))
            .send()
            .await
            .map_err(|e| Error::store_write(&self.table_name, format!("PutItem failed: {e}")))?;
        Ok(())
    }

    async fn query_window(&self, owner: &str, prefix: &str) -> Result<Vec<BuildRecord>> {
        let mut records = Vec::new();
        let mut start_key = None;
        let mut pages = 0usize;

        loop {
            let output = self
                .client
                .query()
                .table_name(&self.table_name)
                .index_name(&self.index_name)
                .key_condition_expression(KEY_CONDITION)
                .expression_attribute_names("#owner", FIELD_USERNAME)
                .expression_attribute_names("#queued_at", FIELD_QUEUED_AT)
                .expression_attribute_values(":owner", AttributeValue::S(owner.to_string()))
                .expression_attribute_values(":prefix", AttributeValue::S(prefix.to_string()))
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| Error::store_query(&self.table_name, format!("Query failed: {e}")))?;

            pages += 1;
            records.extend(output.items().iter().map(item_to_record));

            match output.last_evaluated_key() {
                Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                _ => break,
            }
        }

        debug!(
            "Queried {} records in {} page(s) from {}",
            records.len(),
            pages,
            self.index_name
        );
        Ok(records)
    }
}
