use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::location::LocationField;
use crate::pagination::PaginationConfig;

/// Default location lookup service
pub const DEFAULT_API_URL: &str = "https://provinces.open-api.vn/api";

/// Application configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the location lookup service
    pub api_url: String,

    /// Request timeout for lookups, in seconds
    pub timeout_secs: u64,

    /// Directory for logs written while the picker owns the terminal
    pub data_dir: PathBuf,

    /// Page controls
    pub pagination: PaginationConfig,

    /// Form fields the address is published to
    pub form: FormFields,
}

/// Names of the host form fields
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormFields {
    pub value_field: String,
    pub label_field: String,
}

impl Default for FormFields {
    fn default() -> Self {
        let field = LocationField::default();
        Self {
            value_field: field.value_field,
            label_field: field.label_field,
        }
    }
}

impl FormFields {
    pub fn location_field(&self) -> LocationField {
        LocationField::new(self.value_field.clone(), self.label_field.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 15,
            data_dir: dirs::data_local_dir()
                .map(|dir| dir.join("donorlink"))
                .unwrap_or_else(|| PathBuf::from("./data")),
            pagination: PaginationConfig::default(),
            form: FormFields::default(),
        }
    }
}

impl Config {
    /// Load defaults, then the configuration file, then the environment
    pub async fn init(explicit: Option<&Path>) -> Result<Self> {
        debug!("Initializing configuration");

        let mut config = match explicit {
            Some(path) => Self::load_file(path)
                .await
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
            None => match Self::find_file() {
                Some(path) => Self::load_file(&path)
                    .await
                    .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
                None => Self::default(),
            },
        };

        config.load_from_env();
        Ok(config)
    }

    /// Configuration file search order:
    /// 1. ./.donorlink.json
    /// 2. ./donorlink.json
    /// 3. $CONFIG/donorlink/donorlink.json
    fn find_file() -> Option<PathBuf> {
        let mut config_paths = vec![
            PathBuf::from("./.donorlink.json"),
            PathBuf::from("./donorlink.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            config_paths.push(config_dir.join("donorlink").join("donorlink.json"));
        }

        config_paths.into_iter().find(|path| path.exists())
    }

    pub async fn load_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from: {}", path.display());
        let content = tokio::fs::read_to_string(path).await?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(&mut self) {
        self.apply_env(|key| std::env::var(key).ok());
    }

    fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var("DONORLINK_API_URL") {
            self.api_url = url;
        }

        if let Some(timeout) = var("DONORLINK_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.timeout_secs = timeout;
        }

        if let Some(page_size) = var("DONORLINK_PAGE_SIZE").and_then(|v| v.parse().ok()) {
            self.pagination.page_size = page_size;
        }

        if let Some(siblings) = var("DONORLINK_SIBLINGS").and_then(|v| v.parse().ok()) {
            self.pagination.sibling_count = siblings;
        }

        if let Some(width) = var("DONORLINK_COMPACT_WIDTH").and_then(|v| v.parse().ok()) {
            self.pagination.compact_width = width;
        }

        if let Some(data_dir) = var("DONORLINK_DATA_DIR") {
            self.data_dir = PathBuf::from(data_dir);
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(anyhow!(
                "Invalid API URL {:?}. Set DONORLINK_API_URL to an http(s) URL.",
                self.api_url
            ));
        }

        if self.timeout_secs == 0 {
            return Err(anyhow!("Request timeout must be at least one second"));
        }

        if self.pagination.page_size == 0 {
            return Err(anyhow!("Page size must be greater than zero"));
        }

        if self.form.value_field.is_empty() || self.form.label_field.is_empty() {
            return Err(anyhow!("Form field names must not be empty"));
        }

        Ok(())
    }

    /// Log file used while the terminal is in raw mode
    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("donorlink.log")
    }
}
