use std::collections::HashMap;

use aws_config::SdkConfig;
use aws_sdk_dynamodb::types::AttributeValue;

mod put_item;

/// A dynamodb client bound to a single table
#[derive(Debug, Clone)]
pub struct DynamodbClient {
    table: String,
    client: aws_sdk_dynamodb::Client,
}

impl DynamodbClient {
    pub fn new(aws_config: &SdkConfig, table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            client: aws_sdk_dynamodb::Client::new(aws_config),
        }
    }

    /// Writes the item into the table, replacing any existing item with the same key.
    #[tracing::instrument(skip(self, item), fields(table = %self.table))]
    pub async fn put_item(&self, item: HashMap<String, AttributeValue>) -> anyhow::Result<()> {
        put_item::put_item(&self.client, &self.table, item).await
    }
}
