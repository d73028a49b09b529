//! Resolution of `ALIAS/BUCKET` locations into notification-capable targets
//!
//! Accepted forms:
//! - `ALIAS/BUCKET[/...]` where `ALIAS` is a configured profile
//! - `s3://BUCKET[/...]` using the active profile
//! - `http(s)://HOST[:PORT]/BUCKET[/...]` using the active profile's credentials
//!
//! Anything else is treated as a local path, which has no notification support.

use crate::config::{Config, ConfigStore};
use crate::s3_client::{create_client, S3NotificationSource};
use bevents_core::{Error, NotificationSource, Result};
use std::path::PathBuf;
use tracing::debug;
use url::Url;

/// A parsed location, before any client is built
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    Remote(RemoteLocation),
    Local(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoteLocation {
    /// Alias or endpoint the bucket was reached through
    pub alias: String,
    pub bucket: String,
    pub config: Config,
}

/// Parse `location` against the configured aliases
pub fn parse_location(location: &str, store: &ConfigStore) -> Result<Location> {
    if location.starts_with("http://") || location.starts_with("https://") {
        return parse_url(location, store);
    }

    if let Some(path) = location.strip_prefix("s3://") {
        let bucket = first_segment(path);
        return remote(location, "s3", bucket, store.active());
    }

    let (alias, rest) = location.split_once('/').unwrap_or((location, ""));
    match store.alias(alias) {
        Some(config) => remote(location, alias, first_segment(rest), config.clone()),
        None => Ok(Location::Local(PathBuf::from(location))),
    }
}

fn parse_url(location: &str, store: &ConfigStore) -> Result<Location> {
    let url = Url::parse(location).map_err(|e| Error::resolution(location, e.to_string()))?;
    let host = url
        .host_str()
        .ok_or_else(|| Error::resolution(location, "missing host"))?;

    let endpoint = match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    };
    let bucket = first_segment(url.path().trim_start_matches('/'));

    let mut config = store.active();
    config.endpoint = Some(endpoint.clone());
    remote(location, &endpoint, bucket, config)
}

fn first_segment(path: &str) -> &str {
    path.split('/').next().unwrap_or_default()
}

fn remote(location: &str, alias: &str, bucket: &str, config: Config) -> Result<Location> {
    if bucket.is_empty() {
        return Err(Error::resolution(location, "bucket name cannot be empty"));
    }

    Ok(Location::Remote(RemoteLocation {
        alias: alias.to_string(),
        bucket: bucket.to_string(),
        config,
    }))
}

/// A resolved target
#[derive(Debug)]
pub enum Target {
    Remote(S3NotificationSource),
    Local(PathBuf),
}

impl Target {
    /// Resolve `location` and build the backend client for it
    pub fn resolve(location: &str, store: &ConfigStore) -> Result<Self> {
        match parse_location(location, store)? {
            Location::Remote(remote) => {
                let client = create_client(&remote.config)
                    .map_err(|e| Error::resolution(location, e.to_string()))?;
                let source = S3NotificationSource::new(client, remote.bucket);
                debug!(
                    alias = %remote.alias,
                    bucket = source.bucket(),
                    profile = store.active_profile(),
                    "Resolved remote target"
                );
                Ok(Target::Remote(source))
            }
            Location::Local(path) => {
                debug!(path = %path.display(), "Resolved local target");
                Ok(Target::Local(path))
            }
        }
    }

    /// Notification capability of this target
    pub fn notifications(&self) -> Result<&dyn NotificationSource> {
        match self {
            Target::Remote(source) => Ok(source as &dyn NotificationSource),
            Target::Local(path) => Err(Error::UnsupportedTarget(path.display().to_string())),
        }
    }
}
