use std::collections::HashMap;

use anyhow::Context;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;

/// Unconditionally puts the item. There is no condition expression so the last writer wins.
#[tracing::instrument(skip(client, item))]
pub async fn put_item(
    client: &Client,
    table: &str,
    item: HashMap<String, AttributeValue>,
) -> anyhow::Result<()> {
    client
        .put_item()
        .table_name(table)
        .set_item(Some(item))
        .send()
        .await
        .context(format!("failed to put item into DynamoDB table {table}"))?;

    Ok(())
}
