//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::feed::DEFAULT_LANGUAGE;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,

    // URL
    pub url: String,

    // Directory
    pub posts_dir: String,

    // Server
    pub ip: String,
    pub port: u16,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: "Latest posts from my blog".to_string(),
            language: DEFAULT_LANGUAGE.to_string(),

            url: "http://localhost:8080".to_string(),

            posts_dir: "posts".to_string(),

            ip: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
