//! blog-api: serves a Markdown blog as JSON and RSS
//!
//! Posts are Markdown files with a small front-matter block. They are read
//! fresh from disk on every request; the filesystem is the only store.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod feed;
pub mod helpers;
pub mod server;

pub use error::{Error, Result};

use std::fs;
use std::path::{Path, PathBuf};

use content::PostStore;
use feed::Feed;

/// The main application handle
#[derive(Debug, Clone)]
pub struct BlogApi {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the `*.md` posts
    pub posts_dir: PathBuf,
}

impl BlogApi {
    /// Create a new instance from a directory
    ///
    /// Reads `_config.yml` when present and creates the posts directory if
    /// it does not exist yet.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> anyhow::Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);
        if !posts_dir.exists() {
            fs::create_dir_all(&posts_dir)?;
            tracing::info!("Created posts directory {:?}", posts_dir);
        }

        Ok(Self {
            config,
            base_dir,
            posts_dir,
        })
    }

    /// Post store over the configured posts directory
    pub fn store(&self) -> PostStore {
        PostStore::new(&self.posts_dir)
    }

    /// Build the RSS feed for the site
    pub fn feed(&self) -> Result<Feed> {
        let posts = self.store().list_posts(true)?;
        let feed = feed::build_feed(
            &self.config.title,
            &self.config.url,
            &self.config.description,
            &posts,
        );
        Ok(feed.with_language(&self.config.language))
    }

    /// Create a new post
    pub fn new_post(&self, title: &str) -> anyhow::Result<PathBuf> {
        commands::new::create_post(self, title)
    }
}
