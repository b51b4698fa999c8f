//! The interfaces the ingest pipeline needs from the outside world

use crate::domain::models::{
    IngestErr, IngestSummary, Notification, TransformedRecord, TriggerLocation,
};

/// Reads uploaded objects
#[cfg_attr(test, mockall::automock)]
pub trait ObjectStore: Send + Sync + 'static {
    /// fetch the full contents of the object
    fn get_object(
        &self,
        location: TriggerLocation,
    ) -> impl Future<Output = anyhow::Result<Vec<u8>>> + Send;
}

/// Persists transformed rows
#[cfg_attr(test, mockall::automock)]
pub trait ItemStore: Send + Sync + 'static {
    /// insert the record, replacing any existing item with the same id
    fn put_item(
        &self,
        record: TransformedRecord,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Publishes the completion message
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync + 'static {
    fn publish(
        &self,
        notification: Notification,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Runs the whole pipeline for one uploaded object
#[cfg_attr(test, mockall::automock)]
pub trait IngestService: Send + Sync + 'static {
    fn ingest(
        &self,
        location: TriggerLocation,
    ) -> impl Future<Output = Result<IngestSummary, IngestErr>> + Send;
}
