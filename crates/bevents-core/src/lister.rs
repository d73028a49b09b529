//! Notification listing against a storage backend

use crate::error::{BoxError, Error, Result};
use crate::types::NotificationConfig;
use async_trait::async_trait;
use tracing::debug;

/// Backend capable of reporting bucket notification configurations
#[async_trait]
pub trait NotificationSource: Send + Sync {
    /// List configurations of the bound bucket.
    ///
    /// An empty `arn` lists every configuration; otherwise only those whose
    /// target ARN equals `arn` are returned.
    async fn list_notification_configs(
        &self,
        arn: &str,
    ) -> std::result::Result<Vec<NotificationConfig>, BoxError>;
}

/// List notification configurations through `source`.
///
/// The filter is handed to the backend unchanged and the result order is the
/// backend's order.
pub async fn list_notification_configs(
    source: &dyn NotificationSource,
    arn: &str,
) -> Result<Vec<NotificationConfig>> {
    debug!(arn = %arn, "Listing notification configurations");

    let configs = source
        .list_notification_configs(arn)
        .await
        .map_err(Error::Request)?;

    debug!(count = configs.len(), "Notification configurations received");
    Ok(configs)
}
