//! Bucket notification configuration records
//!
//! A [`NotificationConfig`] is one rule binding a set of S3 event types,
//! optionally scoped by key prefix/suffix, to a target identified by ARN.
//! Records are produced by a storage backend and only read afterwards.

use crate::SUCCESS_STATUS;
use serde::Serialize;

/// One notification rule reported for a bucket
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationConfig {
    /// Configuration ID assigned by the service (may be empty)
    pub id: String,
    /// Target ARN (queue, topic or lambda function)
    pub arn: String,
    /// Event names in service order
    pub events: Vec<String>,
    /// Key prefix filter, empty when unset
    pub prefix: String,
    /// Key suffix filter, empty when unset
    pub suffix: String,
}

impl NotificationConfig {
    pub fn new(id: impl Into<String>, arn: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            arn: arn.into(),
            ..Default::default()
        }
    }

    pub fn with_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.events = events.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Prefix filter, if one is set
    pub fn prefix_filter(&self) -> Option<&str> {
        Some(self.prefix.as_str()).filter(|p| !p.is_empty())
    }

    /// Suffix filter, if one is set
    pub fn suffix_filter(&self) -> Option<&str> {
        Some(self.suffix.as_str()).filter(|s| !s.is_empty())
    }

    /// Structured output view of this record
    pub fn to_message(&self) -> NotificationMessage<'_> {
        NotificationMessage::from(self)
    }
}

/// Structured output record for one configuration
///
/// Field order is the serialization order.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationMessage<'a> {
    pub status: &'static str,
    pub id: &'a str,
    pub events: &'a [String],
    pub prefix: &'a str,
    pub suffix: &'a str,
    pub arn: &'a str,
}

impl<'a> From<&'a NotificationConfig> for NotificationMessage<'a> {
    fn from(config: &'a NotificationConfig) -> Self {
        Self {
            status: SUCCESS_STATUS,
            id: &config.id,
            events: &config.events,
            prefix: &config.prefix,
            suffix: &config.suffix,
            arn: &config.arn,
        }
    }
}
