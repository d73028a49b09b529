//! S3 client wrapper for bevents

use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::Region;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::{BehaviorVersion, Builder as S3ConfigBuilder};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::get_bucket_notification_configuration::GetBucketNotificationConfigurationOutput;
use aws_sdk_s3::types::{Event, NotificationConfigurationFilter};
use aws_sdk_s3::Client;
use bevents_core::{BoxError, NotificationConfig, NotificationSource};
use tracing::debug;

/// Create an S3 client from configuration
pub fn create_client(config: &Config) -> Result<Client> {
    config.validate()?;

    let endpoint = config.endpoint.as_deref().context("Endpoint not configured")?;
    let access_key = config.access_key.as_deref().context("Access key not configured")?;
    let secret_key = config.secret_key.as_deref().context("Secret key not configured")?;

    let credentials = Credentials::new(access_key, secret_key, None, None, "bevents");

    let s3_config = S3ConfigBuilder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .credentials_provider(credentials)
        .endpoint_url(endpoint)
        .force_path_style(config.path_style)
        .build();

    Ok(Client::from_conf(s3_config))
}

/// Bucket notification access through the S3 API
#[derive(Debug, Clone)]
pub struct S3NotificationSource {
    client: Client,
    bucket: String,
}

impl S3NotificationSource {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl NotificationSource for S3NotificationSource {
    async fn list_notification_configs(
        &self,
        arn: &str,
    ) -> std::result::Result<Vec<NotificationConfig>, BoxError> {
        debug!(bucket = %self.bucket, "GetBucketNotificationConfiguration");

        let resp = self
            .client
            .get_bucket_notification_configuration()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| -> BoxError { DisplayErrorContext(e).to_string().into() })?;

        Ok(flatten_notification_configs(&resp, arn))
    }
}

/// Flatten topic, queue and lambda configurations into records, keeping those
/// whose target ARN equals `arn` (all of them when `arn` is empty).
pub fn flatten_notification_configs(
    output: &GetBucketNotificationConfigurationOutput,
    arn: &str,
) -> Vec<NotificationConfig> {
    let topics = output
        .topic_configurations()
        .iter()
        .map(|c| (c.id(), c.topic_arn(), c.events(), c.filter()));
    let queues = output
        .queue_configurations()
        .iter()
        .map(|c| (c.id(), c.queue_arn(), c.events(), c.filter()));
    let lambdas = output
        .lambda_function_configurations()
        .iter()
        .map(|c| (c.id(), c.lambda_function_arn(), c.events(), c.filter()));

    topics
        .chain(queues)
        .chain(lambdas)
        .filter(|(_, target, _, _)| arn.is_empty() || *target == arn)
        .map(|(id, target, events, filter)| to_record(id, target, events, filter))
        .collect()
}

fn to_record(
    id: Option<&str>,
    arn: &str,
    events: &[Event],
    filter: Option<&NotificationConfigurationFilter>,
) -> NotificationConfig {
    let (prefix, suffix) = key_filter_values(filter);
    NotificationConfig::new(id.unwrap_or_default(), arn)
        .with_events(events.iter().map(|e| e.as_str()))
        .with_prefix(prefix)
        .with_suffix(suffix)
}

/// Prefix and suffix values of a key filter; rule names are case-insensitive
fn key_filter_values(filter: Option<&NotificationConfigurationFilter>) -> (String, String) {
    let mut prefix = String::new();
    let mut suffix = String::new();

    let rules = filter
        .and_then(|f| f.key())
        .map(|k| k.filter_rules())
        .unwrap_or_default();

    for rule in rules {
        let value = rule.value().unwrap_or_default();
        match rule.name().map(|n| n.as_str().to_ascii_lowercase()).as_deref() {
            Some("prefix") => prefix = value.to_string(),
            Some("suffix") => suffix = value.to_string(),
            _ => {}
        }
    }

    (prefix, suffix)
}
