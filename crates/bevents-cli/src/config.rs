//! Configuration management for bevents
//!
//! Config file location: ~/.bevents/config.toml
//!
//! Each table is an alias usable as the first segment of `ALIAS/BUCKET`:
//! ```toml
//! [default]
//! endpoint = "http://localhost:9000"
//! access_key = "minioadmin"
//! secret_key = "minioadmin"
//! region = "us-east-1"
//!
//! [production]
//! endpoint = "https://s3.example.com"
//! access_key = "prod-access-key"
//! secret_key = "prod-secret-key"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the profile used when none is given
pub const DEFAULT_PROFILE: &str = "default";

/// Connection settings of one alias
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// S3 endpoint URL
    pub endpoint: Option<String>,

    /// Access key ID
    pub access_key: Option<String>,

    /// Secret access key
    pub secret_key: Option<String>,

    /// AWS region
    #[serde(default = "default_region")]
    pub region: String,

    /// Path style access (use path instead of virtual hosted style)
    #[serde(default = "default_true")]
    pub path_style: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            access_key: None,
            secret_key: None,
            region: default_region(),
            path_style: true,
        }
    }
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Apply environment variable overrides. `AWS_*` variables win over `BEVENTS_*`.
    pub fn apply_env(&mut self, vars: impl Fn(&str) -> Option<String>) {
        if let Some(endpoint) = vars("BEVENTS_ENDPOINT") {
            self.endpoint = Some(endpoint);
        }
        if let Some(endpoint) = vars("AWS_ENDPOINT_URL") {
            self.endpoint = Some(endpoint);
        }
        if let Some(access_key) = vars("BEVENTS_ACCESS_KEY") {
            self.access_key = Some(access_key);
        }
        if let Some(access_key) = vars("AWS_ACCESS_KEY_ID") {
            self.access_key = Some(access_key);
        }
        if let Some(secret_key) = vars("BEVENTS_SECRET_KEY") {
            self.secret_key = Some(secret_key);
        }
        if let Some(secret_key) = vars("AWS_SECRET_ACCESS_KEY") {
            self.secret_key = Some(secret_key);
        }
        if let Some(region) = vars("BEVENTS_REGION") {
            self.region = region;
        }
        if let Some(region) = vars("AWS_REGION") {
            self.region = region;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_none() {
            anyhow::bail!("Endpoint not configured. Set BEVENTS_ENDPOINT or add it to the profile");
        }

        if self.access_key.is_none() {
            anyhow::bail!("Access key not configured. Set BEVENTS_ACCESS_KEY or add it to the profile");
        }

        if self.secret_key.is_none() {
            anyhow::bail!("Secret key not configured. Set BEVENTS_SECRET_KEY or add it to the profile");
        }

        Ok(())
    }
}

/// Configuration file with multiple profiles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(flatten)]
    pub profiles: HashMap<String, Config>,
}

/// Environment variables consulted by [`Config::apply_env`]
const ENV_KEYS: &[&str] = &[
    "BEVENTS_ENDPOINT",
    "AWS_ENDPOINT_URL",
    "BEVENTS_ACCESS_KEY",
    "AWS_ACCESS_KEY_ID",
    "BEVENTS_SECRET_KEY",
    "AWS_SECRET_ACCESS_KEY",
    "BEVENTS_REGION",
    "AWS_REGION",
];

/// Loaded profiles plus the name of the active one
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    file: ConfigFile,
    active: String,
    env: HashMap<String, String>,
}

impl ConfigStore {
    /// Get config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let home = directories::BaseDirs::new()
            .context("Could not determine home directory")?
            .home_dir()
            .to_path_buf();

        Ok(home.join(".bevents"))
    }

    /// Get default config file path
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load profiles from `path` (or the default location) and the environment
    pub fn load(path: Option<&Path>, profile: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        let file = if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            Self::parse(&content)?
        } else {
            ConfigFile::default()
        };

        Ok(Self::new(file, profile, |key| std::env::var(key).ok()))
    }

    /// Parse a config file body
    pub fn parse(content: &str) -> Result<ConfigFile> {
        toml::from_str(content).with_context(|| "Failed to parse config file")
    }

    pub fn new(
        file: ConfigFile,
        profile: Option<&str>,
        vars: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let env = ENV_KEYS
            .iter()
            .filter_map(|&key| vars(key).map(|value| (key.to_string(), value)))
            .collect();

        Self {
            file,
            active: profile.unwrap_or(DEFAULT_PROFILE).to_string(),
            env,
        }
    }

    /// Name of the active profile
    pub fn active_profile(&self) -> &str {
        &self.active
    }

    /// Settings of the alias `name`, without environment overrides
    pub fn alias(&self, name: &str) -> Option<&Config> {
        self.file.profiles.get(name)
    }

    /// Settings of the active profile, with environment overrides applied
    pub fn active(&self) -> Config {
        let mut config = self.alias(&self.active).cloned().unwrap_or_default();
        config.apply_env(|key| self.env.get(key).cloned());
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[default]
endpoint = "http://localhost:9000"
access_key = "minioadmin"
secret_key = "minioadmin"

[production]
endpoint = "https://s3.example.com"
access_key = "prod-access-key"
secret_key = "prod-secret-key"
region = "eu-west-1"
path_style = false
"#;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.region, "us-east-1");
        assert!(config.path_style);
        assert!(config.validate().is_err());

        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_parse_profiles() {
        let store = ConfigStore::new(ConfigStore::parse(SAMPLE).unwrap(), None, no_env);

        assert_eq!(store.active_profile(), "default");
        let prod = store.alias("production").unwrap();
        assert_eq!(prod.region, "eu-west-1");
        assert!(!prod.path_style);
        assert!(store.alias("missing").is_none());

        let active = store.active();
        assert_eq!(active.endpoint.as_deref(), Some("http://localhost:9000"));
        assert!(active.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_active_profile() {
        let file = ConfigStore::parse(SAMPLE).unwrap();
        let store = ConfigStore::new(file, Some("production"), |key| match key {
            "BEVENTS_ENDPOINT" => Some("http://bevents:9000".to_string()),
            "AWS_ENDPOINT_URL" => Some("http://aws:9000".to_string()),
            "BEVENTS_REGION" => Some("ap-south-1".to_string()),
            _ => None,
        });

        let active = store.active();
        assert_eq!(active.endpoint.as_deref(), Some("http://aws:9000"));
        assert_eq!(active.region, "ap-south-1");
        assert_eq!(active.access_key.as_deref(), Some("prod-access-key"));

        // Aliases are used as configured
        let prod = store.alias("production").unwrap();
        assert_eq!(prod.endpoint.as_deref(), Some("https://s3.example.com"));
    }

    #[test]
    fn test_validate_reports_missing_field() {
        let config = Config {
            endpoint: Some("http://localhost:9000".to_string()),
            access_key: Some("key".to_string()),
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Secret key"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let path = std::env::temp_dir().join("bevents-missing-config.toml");
        let store = ConfigStore::load(Some(&path), Some("nope")).unwrap();
        assert_eq!(store.active_profile(), "nope");
        assert!(store.alias("default").is_none());
    }
}
