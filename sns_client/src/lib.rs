use anyhow::Context;

#[derive(Clone, Debug)]
pub struct SNS {
    inner: aws_sdk_sns::Client,
}

impl SNS {
    pub fn new(inner: aws_sdk_sns::Client) -> Self {
        Self { inner }
    }

    /// Publishes a plain text message with a subject line to the topic.
    ///
    /// The subject is used by email subscriptions as the mail subject. SNS rejects subjects
    /// longer than 100 characters or containing line breaks.
    ///
    /// # Returns
    ///
    /// * The message id assigned by SNS, if one was returned
    #[tracing::instrument(skip(self, message))]
    pub async fn publish_with_subject(
        &self,
        topic_arn: &str,
        subject: &str,
        message: &str,
    ) -> anyhow::Result<Option<String>> {
        let output = self
            .inner
            .publish()
            .topic_arn(topic_arn)
            .subject(subject)
            .message(message)
            .send()
            .await
            .context(format!("could not publish to topic {topic_arn}"))?;

        Ok(output.message_id().map(str::to_string))
    }
}
