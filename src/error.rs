//! Error types for loading posts

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the post store
#[derive(Error, Debug)]
pub enum Error {
    /// The posts directory could not be listed
    #[error("posts directory {path:?} is unavailable: {source}")]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A single post file could not be read
    #[error("failed to load post {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No post exists for the requested slug
    #[error("post not found: {slug}")]
    NotFound { slug: String },
}

impl Error {
    /// Whether this error means the requested post does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
