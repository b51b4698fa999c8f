//! Adapters which implement the [crate::domain::ports] on top of the aws clients

pub mod dynamodb_item_store;
pub mod s3_object_store;
pub mod sns_notifier;
