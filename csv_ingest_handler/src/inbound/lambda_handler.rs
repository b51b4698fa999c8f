use lambda_runtime::{
    Error, LambdaEvent,
    tracing::{self},
};
use serde_json::Value;

use crate::domain::{
    event::parse_trigger_event,
    models::{IngestErr, IngestSummary, SUCCESS_MESSAGE},
    ports::IngestService,
};

/// The api gateway shaped result of an invocation
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    /// a json encoded string
    pub body: String,
}

impl HandlerResponse {
    fn new(status_code: u16, text: String) -> Self {
        HandlerResponse {
            status_code,
            body: Value::String(text).to_string(),
        }
    }
}

impl From<Result<IngestSummary, IngestErr>> for HandlerResponse {
    fn from(result: Result<IngestSummary, IngestErr>) -> Self {
        match result {
            Ok(_) => HandlerResponse::new(200, SUCCESS_MESSAGE.to_string()),
            Err(err) => HandlerResponse::new(500, format!("Error: {err}")),
        }
    }
}

/// Processes the s3 event.
///
/// Every failure is reported through the 500 response rather than as an invocation error so the
/// event is not retried by the lambda service.
#[tracing::instrument(skip_all, fields(request_id = %event.context.request_id))]
pub async fn handler<T: IngestService>(
    service: &T,
    event: LambdaEvent<Value>,
) -> Result<HandlerResponse, Error> {
    Ok(handle_payload(service, event.payload).await)
}

pub async fn handle_payload<T: IngestService>(service: &T, payload: Value) -> HandlerResponse {
    tracing::debug!(event=%payload, "received event");

    let result = match parse_trigger_event(&payload) {
        Ok(location) => service.ingest(location).await,
        Err(err) => Err(err),
    };

    if let Err(err) = &result {
        tracing::error!(error=%err, "invocation failed");
    }

    result.into()
}
