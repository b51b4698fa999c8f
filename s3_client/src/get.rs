use anyhow::Context;
use aws_sdk_s3 as s3;
use aws_sdk_s3::error::SdkError;

/// Reads the full body of `key` in `bucket` into memory.
#[tracing::instrument(skip(client))]
pub async fn get(client: &s3::Client, bucket: &str, key: &str) -> anyhow::Result<Vec<u8>> {
    let resp = match client.get_object().bucket(bucket).key(key).send().await {
        Ok(resp) => resp,
        Err(SdkError::ServiceError(err)) if err.err().is_no_such_key() => {
            anyhow::bail!("object {key} does not exist in bucket {bucket}")
        }
        Err(err) => {
            return Err(err).context(format!("could not get object {key} from bucket {bucket}"));
        }
    };

    let body = resp
        .body
        .collect()
        .await
        .context("could not collect object body")?;

    let bytes = body.into_bytes().to_vec();
    tracing::trace!(size = bytes.len(), "retrieved object");

    Ok(bytes)
}
