use lambda_runtime::tracing;
use serde_json::Value;

use crate::domain::models::{IngestErr, TriggerLocation};

/// Reads the bucket and key of the first record of an s3 `ObjectCreated` notification.
///
/// Only `Records[0]` is used; any further records in a batched notification are ignored.
#[tracing::instrument(skip(event))]
pub fn parse_trigger_event(event: &Value) -> Result<TriggerLocation, IngestErr> {
    let records = event
        .get("Records")
        .and_then(Value::as_array)
        .ok_or_else(|| IngestErr::MalformedEvent("missing Records".to_string()))?;

    let record = records
        .first()
        .ok_or_else(|| IngestErr::MalformedEvent("Records is empty".to_string()))?;

    if records.len() > 1 {
        tracing::warn!(
            ignored = records.len() - 1,
            "event contains more than one record, only the first is processed"
        );
    }

    let s3 = record
        .get("s3")
        .ok_or_else(|| IngestErr::MalformedEvent("missing Records[0].s3".to_string()))?;

    let bucket = s3
        .get("bucket")
        .and_then(|bucket| bucket.get("name"))
        .and_then(Value::as_str)
        .ok_or_else(|| IngestErr::MalformedEvent("missing Records[0].s3.bucket.name".to_string()))?
        .to_string();

    let encoded_key = s3
        .get("object")
        .and_then(|object| object.get("key"))
        .and_then(Value::as_str)
        .ok_or_else(|| IngestErr::MalformedEvent("missing Records[0].s3.object.key".to_string()))?;

    Ok(TriggerLocation {
        bucket,
        key: decode_key(encoded_key)?,
    })
}

/// s3 event notifications form-encode the object key, so spaces arrive as `+`
fn decode_key(encoded_key: &str) -> Result<String, IngestErr> {
    let plus_decoded = encoded_key.replace('+', " ");

    urlencoding::decode(&plus_decoded)
        .map(|key| key.into_owned())
        .map_err(|e| {
            IngestErr::MalformedEvent(format!("object key {encoded_key} is not valid utf-8: {e}"))
        })
}
