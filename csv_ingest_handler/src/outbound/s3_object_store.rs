use s3_client::S3;

use crate::domain::{models::TriggerLocation, ports::ObjectStore};

pub struct S3ObjectStore {
    inner: S3,
}

impl S3ObjectStore {
    pub fn new(inner: S3) -> Self {
        S3ObjectStore { inner }
    }
}

impl ObjectStore for S3ObjectStore {
    fn get_object(
        &self,
        location: TriggerLocation,
    ) -> impl Future<Output = anyhow::Result<Vec<u8>>> + Send {
        async move { self.inner.get(&location.bucket, &location.key).await }
    }
}
