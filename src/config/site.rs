//! Blog configuration (_config.yml)

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::content::DEFAULT_WORDS_PER_MINUTE;
use crate::helpers::check_date_format;

/// Main blog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    // Site
    pub title: String,

    // Content
    pub source_dir: String,
    pub document_type: String,

    // Listing
    pub page_size: usize,

    // Post pages
    pub words_per_minute: u32,
    pub date_format: String,

    // API server
    #[serde(default)]
    pub server: ServerConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            title: "spacetraveling".to_string(),

            source_dir: "content".to_string(),
            document_type: "posts".to_string(),

            page_size: 2,

            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            date_format: "DD MMM YYYY".to_string(),

            server: ServerConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl BlogConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: BlogConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the feed and estimator cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        if self.words_per_minute == 0 {
            bail!("words_per_minute must be at least 1");
        }
        if let Err(e) = check_date_format(&self.date_format) {
            bail!("date_format: {}", e);
        }
        Ok(())
    }
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}
