use anyhow::Context;
use lambda_entrypoint::Environment;

/// The configuration parameters for the function, read from the environment at cold start.
#[derive(Debug, Clone)]
pub struct Config {
    /// The dynamodb table the rows are written to
    pub table_name: String,

    /// The sns topic the completion notification is published to
    pub topic_arn: String,

    /// The environment we are in
    pub environment: Environment,
}

impl Config {
    pub fn from_env(environment: Environment) -> anyhow::Result<Self> {
        Self::from_lookup(environment, |name| std::env::var(name).ok())
    }

    fn from_lookup(
        environment: Environment,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let table_name =
            lookup("DYNAMODB_TABLE_NAME").context("DYNAMODB_TABLE_NAME must be provided")?;
        let topic_arn = lookup("SNS_TOPIC_ARN").context("SNS_TOPIC_ARN must be provided")?;

        Ok(Config {
            table_name,
            topic_arn,
            environment,
        })
    }
}
