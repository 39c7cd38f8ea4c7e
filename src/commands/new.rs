//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::helpers::short_date;
use crate::BlogApi;

/// Create a new post scaffold named after the slugified title
pub fn create_post(app: &BlogApi, title: &str) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} has no characters usable in a file name", title);
    }

    fs::create_dir_all(&app.posts_dir)?;
    let file_path = app.posts_dir.join(format!("{}.md", slug));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let today = short_date(&chrono::Local::now());
    let content = format!(
        "---\ntitle: \"{}\"\ndate: \"{}\"\ntags: []\n---\n\n",
        title, today
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created post {:?}", file_path);

    Ok(file_path)
}
