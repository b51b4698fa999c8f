use lambda_runtime::tracing;

use crate::domain::{
    models::{IngestErr, IngestSummary, TriggerLocation},
    ports::{IngestService, ItemStore, Notifier, ObjectStore},
    records::{RecordReader, transform},
};


/// The furthest point an invocation reached, reported when it fails. The event has already been
/// parsed by the time the pipeline starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    EventParsed,
    ObjectFetched,
    RecordsProcessing,
    AllRecordsWritten,
}

#[derive(Debug)]
struct Progress {
    stage: Stage,
    rows_written: usize,
}

/// struct which sequences fetch, parse, write and notify over abstracted interfaces for mocking
pub struct IngestPipeline<S, D, N> {
    /// where uploaded files are read from
    objects: S,
    /// where transformed rows are written to
    items: D,
    /// where the completion message is sent
    notifier: N,
}

impl<S, D, N> IngestPipeline<S, D, N>
where
    S: ObjectStore,
    D: ItemStore,
    N: Notifier,
{
    pub fn new(objects: S, items: D, notifier: N) -> Self {
        IngestPipeline {
            objects,
            items,
            notifier,
        }
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_text(&self, location: &TriggerLocation) -> Result<String, IngestErr> {
        let bytes = self
            .objects
            .get_object(location.clone())
            .await
            .map_err(|error| IngestErr::StorageAccess {
                bucket: location.bucket.clone(),
                key: location.key.clone(),
                error,
            })?;

        let mut text = String::from_utf8(bytes).map_err(|source| IngestErr::Decode {
            key: location.key.clone(),
            source,
        })?;

        if text.starts_with('\u{feff}') {
            text.replace_range(..'\u{feff}'.len_utf8(), "");
        }

        Ok(text)
    }

    /// writes every row in order, stopping at the first row that fails
    async fn store_records(&self, text: &str, progress: &mut Progress) -> Result<(), IngestErr> {
        progress.stage = Stage::RecordsProcessing;

        let records = RecordReader::new(text.as_bytes())?;
        tracing::debug!(headers=?records.headers(), "parsed header");

        for record in records {
            let record = transform(record?)?;
            let id = record.id.clone();

            tracing::debug!(record=?record, "inserting row");

            self.items
                .put_item(record)
                .await
                .map_err(|error| IngestErr::StorageWrite { id, error })?;

            progress.rows_written += 1;
        }

        Ok(())
    }

    async fn run(
        &self,
        location: &TriggerLocation,
        progress: &mut Progress,
    ) -> Result<IngestSummary, IngestErr> {
        let text = self.fetch_text(location).await?;
        progress.stage = Stage::ObjectFetched;

        self.store_records(&text, progress).await?;
        progress.stage = Stage::AllRecordsWritten;

        let summary = IngestSummary {
            key: location.key.clone(),
            rows_inserted: progress.rows_written,
        };

        self.notifier
            .publish(summary.notification())
            .await
            .map_err(IngestErr::NotificationDelivery)?;

        Ok(summary)
    }
}

impl<S, D, N> IngestService for IngestPipeline<S, D, N>
where
    S: ObjectStore,
    D: ItemStore,
    N: Notifier,
{
    #[tracing::instrument(skip(self, location), fields(bucket = %location.bucket, key = %location.key))]
    async fn ingest(&self, location: TriggerLocation) -> Result<IngestSummary, IngestErr> {
        tracing::info!("processing file");

        let mut progress = Progress {
            stage: Stage::EventParsed,
            rows_written: 0,
        };

        match self.run(&location, &mut progress).await {
            Ok(summary) => {
                tracing::info!(rows_inserted = summary.rows_inserted, "file processed");
                Ok(summary)
            }
            Err(err) => {
                // rows written before the failure are not rolled back
                tracing::debug!(
                    stage=?progress.stage,
                    rows_written = progress.rows_written,
                    "stopped processing file"
                );
                Err(err)
            }
        }
    }
}
