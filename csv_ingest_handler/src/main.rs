mod config;
mod domain;
mod inbound;
mod outbound;

use anyhow::Context;
use config::Config;
use domain::service::IngestPipeline;
use dynamodb_client::DynamodbClient;
use inbound::lambda_handler::handler;
use lambda_entrypoint::Entrypoint;
use lambda_runtime::{Error, LambdaEvent, run, service_fn, tracing};
use outbound::{
    dynamodb_item_store::DynamodbItemStore, s3_object_store::S3ObjectStore,
    sns_notifier::SnsNotifier,
};
use serde_json::Value;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let entrypoint = Entrypoint::default().init();

    tracing::trace!("initiating lambda");

    let config = Config::from_env(entrypoint.environment())
        .context("all necessary env vars should be available")?;

    tracing::trace!(environment=%config.environment, "initialized config");

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;

    let pipeline = IngestPipeline::new(
        S3ObjectStore::new(s3_client::S3::new(aws_sdk_s3::Client::new(&aws_config))),
        DynamodbItemStore::new(DynamodbClient::new(&aws_config, config.table_name)),
        SnsNotifier::new(
            sns_client::SNS::new(aws_sdk_sns::Client::new(&aws_config)),
            config.topic_arn,
        ),
    );

    tracing::trace!("initialized clients");

    let shared_pipeline = Arc::new(pipeline);

    let func = service_fn(move |event: LambdaEvent<Value>| {
        let pipeline = shared_pipeline.clone();

        async move { handler(pipeline.as_ref(), event).await }
    });

    run(func).await
}
