use lambda_runtime::tracing;
use sns_client::SNS;

use crate::domain::{models::Notification, ports::Notifier};

/// Publishes notifications to a single topic
pub struct SnsNotifier {
    inner: SNS,
    topic_arn: String,
}

impl SnsNotifier {
    pub fn new(inner: SNS, topic_arn: impl Into<String>) -> Self {
        SnsNotifier {
            inner,
            topic_arn: topic_arn.into(),
        }
    }
}

impl Notifier for SnsNotifier {
    fn publish(
        &self,
        notification: Notification,
    ) -> impl Future<Output = anyhow::Result<()>> + Send {
        async move {
            let message_id = self
                .inner
                .publish_with_subject(
                    &self.topic_arn,
                    &notification.subject,
                    &notification.message,
                )
                .await?;

            tracing::info!(message_id=?message_id, "sent completion notification");

            Ok(())
        }
    }
}
