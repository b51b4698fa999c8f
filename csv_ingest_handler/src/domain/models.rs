use std::collections::BTreeMap;
use std::num::ParseIntError;

use thiserror::Error;

/// The column used as the partition key of the stored item
pub const ID_FIELD: &str = "id";

/// The column which is coerced into an integer
pub const AGE_FIELD: &str = "age";

/// The subject line of the completion notification
pub const NOTIFICATION_SUBJECT: &str = "CSV Processing Complete";

/// The response text returned once every row is stored and the notification is sent
pub const SUCCESS_MESSAGE: &str = "CSV rows stored & SNS notification sent!";

/// Where the uploaded object lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerLocation {
    pub bucket: String,
    pub key: String,
}

/// A single data row of the uploaded file, keyed by the header names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based position of the row in the data section (the header is row 0)
    pub row: usize,
    pub fields: BTreeMap<String, String>,
}

/// A row after `id` and `age` have been coerced, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformedRecord {
    pub id: String,
    /// wide enough for the 38 digits a dynamodb number can hold
    pub age: i128,
    /// every column other than `id` and `age`, unmodified
    pub attributes: BTreeMap<String, String>,
}

/// The notification published once the whole file has been stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub message: String,
}

/// The outcome of a fully processed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestSummary {
    pub key: String,
    pub rows_inserted: usize,
}

impl IngestSummary {
    pub fn notification(&self) -> Notification {
        Notification {
            subject: NOTIFICATION_SUBJECT.to_string(),
            message: format!(
                "CSV file '{}' processed successfully.\nTotal rows inserted: {}",
                self.key, self.rows_inserted
            ),
        }
    }
}

/// Every way an invocation can fail. The first error aborts the rest of the file and rows that
/// were already written stay written.
#[derive(Debug, Error)]
pub enum IngestErr {
    #[error("malformed trigger event: {0}")]
    MalformedEvent(String),
    #[error("unable to read object '{key}' from bucket '{bucket}': {error:#}")]
    StorageAccess {
        bucket: String,
        key: String,
        error: anyhow::Error,
    },
    #[error("object '{key}' is not valid UTF-8")]
    Decode {
        key: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
    #[error("unable to parse row {row}: {source}")]
    Parse {
        row: usize,
        #[source]
        source: csv::Error,
    },
    #[error("row {row} is missing required field '{field}'")]
    MissingField { row: usize, field: &'static str },
    #[error("row {row} has non-integer '{field}' value '{value}'")]
    FieldCoercion {
        row: usize,
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("row {row} has '{field}' value '{value}' which is too large to store")]
    FieldOutOfRange {
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error("unable to store item with id '{id}': {error:#}")]
    StorageWrite { id: String, error: anyhow::Error },
    #[error("unable to publish notification: {0:#}")]
    NotificationDelivery(anyhow::Error),
}
