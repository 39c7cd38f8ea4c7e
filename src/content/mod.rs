//! Content module - handles posts and front-matter parsing

mod frontmatter;
pub mod loader;
mod post;

pub use frontmatter::FrontMatter;
pub use loader::PostStore;
pub use post::{derive_excerpt, title_from_slug, Post, EXCERPT_LENGTH};
