//! List posts and tags

use anyhow::Result;
use std::collections::HashMap;

use crate::content::Post;
use crate::BlogApi;

/// List site content by type
pub fn run(app: &BlogApi, content_type: &str) -> Result<()> {
    let posts = app.store().list_posts(false)?;

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", posts.len());
            for post in &posts {
                println!("  {} - {} [{}]", post.publish_date, post.title, post.slug);
            }
        }
        "tag" | "tags" => {
            let tags = tag_counts(&posts);
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, tag", content_type);
        }
    }

    Ok(())
}

/// Count posts per tag, most used first, ties by name
fn tag_counts(posts: &[Post]) -> Vec<(String, usize)> {
    let mut tags: HashMap<String, usize> = HashMap::new();
    for post in posts {
        for tag in &post.tags {
            *tags.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    let mut tags: Vec<_> = tags.into_iter().collect();
    tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    tags
}
