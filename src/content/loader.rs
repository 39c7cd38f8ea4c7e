//! Post store - loads posts from the posts directory
//!
//! Every call rescans the directory and rereads each file, so edits on disk
//! show up on the next request with nothing to invalidate.

use std::fs;
use std::path::{Path, PathBuf};

use super::post::{derive_excerpt, title_from_slug};
use super::{FrontMatter, Post};
use crate::error::{Error, Result};
use crate::helpers::{from_system_time, short_date};

/// Extension of post files
const POST_EXTENSION: &str = "md";

/// Loads posts from a flat directory of Markdown files
#[derive(Debug, Clone)]
pub struct PostStore {
    posts_dir: PathBuf,
}

impl PostStore {
    /// Create a store over `posts_dir`
    pub fn new<P: AsRef<Path>>(posts_dir: P) -> Self {
        Self {
            posts_dir: posts_dir.as_ref().to_path_buf(),
        }
    }

    /// The directory this store reads from
    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    /// Load all posts, newest first
    ///
    /// Files that fail to load are skipped with a warning. Only a directory
    /// that cannot be listed is an error. Posts with equal dates keep
    /// filename order.
    pub fn list_posts(&self, include_content: bool) -> Result<Vec<Post>> {
        let entries = fs::read_dir(&self.posts_dir).map_err(|source| {
            Error::DirectoryUnavailable {
                path: self.posts_dir.clone(),
                source,
            }
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Failed to read entry in {:?}: {}", self.posts_dir, e);
                    continue;
                }
            };

            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            let path = entry.path();
            if !is_dir && is_markdown_file(&path) {
                paths.push(path);
            }
        }

        // read_dir order is platform-dependent
        paths.sort();

        let mut posts = Vec::with_capacity(paths.len());
        for path in paths {
            match load_post(&path, include_content) {
                Ok(post) => posts.push(post),
                Err(e) => {
                    tracing::warn!("Skipping post {:?}: {}", path, e);
                }
            }
        }

        // Sort by date descending (newest first); sort_by is stable
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(posts)
    }

    /// Load a single post, with content, by its slug
    ///
    /// The slug is joined onto the directory as-is; callers must reject
    /// path separators and `..` before getting here.
    pub fn get_post(&self, slug: &str) -> Result<Post> {
        let path = self.posts_dir.join(format!("{}.{}", slug, POST_EXTENSION));

        load_post(&path, true).map_err(|e| {
            tracing::debug!("Lookup of {:?} failed: {}", slug, e);
            Error::NotFound {
                slug: slug.to_string(),
            }
        })
    }
}

/// Load a single post from a file
pub fn load_post(path: &Path, include_content: bool) -> Result<Post> {
    let load_error = |source: std::io::Error| Error::Load {
        path: path.to_path_buf(),
        source,
    };

    let raw = fs::read_to_string(path).map_err(load_error)?;
    let (fm, body) = FrontMatter::parse(&raw);

    let slug = slug_from_path(path);

    let title = fm
        .title
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| title_from_slug(&slug));

    let date = match fm.date {
        Some(date) => date,
        None => {
            let modified = fs::metadata(path)
                .and_then(|m| m.modified())
                .map_err(load_error)?;
            from_system_time(modified)
        }
    };

    let content = include_content.then(|| body.trim().to_string());

    // Without the body there is nothing to derive an excerpt from
    let excerpt = match fm.excerpt.filter(|e| !e.is_empty()) {
        Some(excerpt) => excerpt,
        None => content.as_deref().map(derive_excerpt).unwrap_or_default(),
    };

    Ok(Post {
        slug,
        title,
        publish_date: short_date(&date),
        date,
        tags: fm.tags,
        content,
        excerpt,
    })
}

/// File name without the `.md` extension
fn slug_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Check if a path names a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == POST_EXTENSION)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    const WITH_FRONTMATTER: &str = r#"---
title: "Test Post with Frontmatter"
date: "2025-06-05"
tags: ["golang", "testing"]
excerpt: "This is a test post excerpt"
---

# Test Post with Frontmatter

This is the content of a test post with proper frontmatter.

It has multiple paragraphs and should be parsed correctly."#;

    const WITHOUT_FRONTMATTER: &str = r#"# Post Without Frontmatter

This is a simple post without any frontmatter.

It should still be parsed correctly with defaults."#;

    fn write_post(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn set_mtime(path: &Path, time: SystemTime) {
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(time)
            .unwrap();
    }

    fn dated(title: &str, date: &str) -> String {
        format!("---\ntitle: {}\ndate: {}\n---\n\nBody of {}.\n", title, date, title)
    }

    #[test]
    fn test_load_post_with_frontmatter() {
        let dir = TempDir::new().unwrap();
        let path = write_post(dir.path(), "post-with-frontmatter.md", WITH_FRONTMATTER);

        let post = load_post(&path, true).unwrap();
        assert_eq!(post.slug, "post-with-frontmatter");
        assert_eq!(post.title, "Test Post with Frontmatter");
        assert_eq!(post.date.to_rfc3339(), "2025-06-05T00:00:00+00:00");
        assert_eq!(post.publish_date, "2025-06-05");
        assert_eq!(post.tags, vec!["golang", "testing"]);
        assert_eq!(post.excerpt, "This is a test post excerpt");

        let content = post.content.unwrap();
        assert!(content.starts_with("# Test Post with Frontmatter"));
        assert!(content.ends_with("parsed correctly."));
    }

    #[test]
    fn test_load_post_without_frontmatter() {
        let dir = TempDir::new().unwrap();
        let path = write_post(dir.path(), "post-without-frontmatter.md", WITHOUT_FRONTMATTER);
        let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        set_mtime(&path, mtime);

        let post = load_post(&path, true).unwrap();
        assert_eq!(post.title, "Post Without Frontmatter");
        assert_eq!(post.content.as_deref(), Some(WITHOUT_FRONTMATTER.trim()));
        assert_eq!(
            post.excerpt,
            "This is a simple post without any frontmatter. \
             It should still be parsed correctly with defaults."
        );
        assert_eq!(post.date.timestamp(), 1_700_000_000);
        assert_eq!(post.publish_date, short_date(&post.date));
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_load_post_without_content() {
        let dir = TempDir::new().unwrap();
        let path = write_post(dir.path(), "no-excerpt.md", "---\ntitle: Meta only\n---\n\nSome prose.\n");

        let post = load_post(&path, false).unwrap();
        assert_eq!(post.title, "Meta only");
        assert!(post.content.is_none());
        // No body loaded means no derived excerpt
        assert_eq!(post.excerpt, "");

        let post = load_post(&path, true).unwrap();
        assert_eq!(post.excerpt, "Some prose.");
    }

    #[test]
    fn test_rfc3339_date() {
        let dir = TempDir::new().unwrap();
        let path = write_post(
            dir.path(),
            "rfc3339.md",
            "---\ndate: \"2025-06-03T10:30:00Z\"\n---\nBody",
        );

        let post = load_post(&path, true).unwrap();
        assert_eq!(post.date.to_rfc3339(), "2025-06-03T10:30:00+00:00");
        assert_eq!(post.publish_date, "2025-06-03");
    }

    #[test]
    fn test_invalid_date_falls_back_to_mtime() {
        let dir = TempDir::new().unwrap();
        let path = write_post(
            dir.path(),
            "invalid-date-post.md",
            "---\ntitle: \"Post with Invalid Date\"\ndate: \"not-a-date\"\n---\nBody",
        );
        let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(1_717_171_717);
        set_mtime(&path, mtime);

        let post = load_post(&path, true).unwrap();
        assert_eq!(post.title, "Post with Invalid Date");
        assert_eq!(post.date.timestamp(), 1_717_171_717);
        assert_eq!(post.publish_date, short_date(&post.date));
    }

    #[test]
    fn test_loose_date_forms_fall_back_to_mtime() {
        let dir = TempDir::new().unwrap();
        let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);

        for (name, date) in [
            ("unpadded.md", "2025-6-5"),
            ("space-separated.md", "2025-06-03 10:30:00Z"),
            ("lowercase.md", "2025-06-03t10:30:00z"),
        ] {
            let path = write_post(dir.path(), name, &format!("---\ndate: {}\n---\nBody", date));
            set_mtime(&path, mtime);

            let post = load_post(&path, false).unwrap();
            assert_eq!(post.date.timestamp(), 1_600_000_000, "{}", date);
        }
    }

    #[test]
    fn test_empty_title_and_excerpt_fall_back() {
        let dir = TempDir::new().unwrap();
        let path = write_post(
            dir.path(),
            "my-empty-fields.md",
            "---\ntitle: \"\"\nexcerpt: ''\ndate: 2025-01-01\n---\nDerived here.",
        );

        let post = load_post(&path, true).unwrap();
        assert_eq!(post.title, "My Empty Fields");
        assert_eq!(post.excerpt, "Derived here.");
    }

    #[test]
    fn test_long_excerpt_is_truncated() {
        let dir = TempDir::new().unwrap();
        let body = format!(
            "---\ntitle: Long Post\ndate: 2025-06-05\n---\n\n# Long Post\n\n{}\n\n{}\n\nThird.",
            "x".repeat(120),
            "y".repeat(120)
        );
        let path = write_post(dir.path(), "long-post.md", &body);

        let post = load_post(&path, true).unwrap();
        assert_eq!(post.excerpt.chars().count(), 203);
        assert!(post.excerpt.ends_with("..."));
        assert!(!post.excerpt.contains("Third"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_post(&dir.path().join("nope.md"), true).unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
    }

    #[test]
    fn test_list_posts_sorted_newest_first() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "a-oldest.md", &dated("Oldest", "2025-06-03"));
        write_post(dir.path(), "b-newest.md", &dated("Newest", "2025-06-05"));
        write_post(dir.path(), "c-middle.md", &dated("Middle", "2025-06-04"));

        let store = PostStore::new(dir.path());
        let posts = store.list_posts(false).unwrap();
        let dates: Vec<&str> = posts.iter().map(|p| p.publish_date.as_str()).collect();
        assert_eq!(dates, vec!["2025-06-05", "2025-06-04", "2025-06-03"]);
        assert!(posts.iter().all(|p| p.content.is_none()));
    }

    #[test]
    fn test_list_posts_ties_keep_filename_order() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "zeta.md", &dated("Zeta", "2025-06-05"));
        write_post(dir.path(), "alpha.md", &dated("Alpha", "2025-06-05"));
        write_post(dir.path(), "mid.md", &dated("Mid", "2025-06-05"));

        let posts = PostStore::new(dir.path()).list_posts(false).unwrap();
        let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_list_posts_ignores_other_entries() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "real.md", &dated("Real", "2025-06-05"));
        write_post(dir.path(), "notes.txt", "not a post");
        write_post(dir.path(), "README.markdown", "not a post either");
        fs::create_dir(dir.path().join("drafts.md")).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        write_post(&dir.path().join("nested"), "hidden.md", &dated("Hidden", "2025-06-06"));

        let posts = PostStore::new(dir.path()).list_posts(true).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "real");
    }

    #[test]
    fn test_list_posts_skips_unreadable_files() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "good.md", &dated("Good", "2025-06-05"));
        fs::write(dir.path().join("binary.md"), [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let posts = PostStore::new(dir.path()).list_posts(true).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "good");
    }

    #[test]
    fn test_list_posts_missing_directory() {
        let dir = TempDir::new().unwrap();
        let store = PostStore::new(dir.path().join("missing"));
        let err = store.list_posts(false).unwrap_err();
        assert!(matches!(err, Error::DirectoryUnavailable { .. }));
    }

    #[test]
    fn test_list_posts_picks_up_changes() {
        let dir = TempDir::new().unwrap();
        let store = PostStore::new(dir.path());
        assert!(store.list_posts(false).unwrap().is_empty());

        write_post(dir.path(), "fresh.md", &dated("Fresh", "2025-06-05"));
        assert_eq!(store.list_posts(false).unwrap().len(), 1);
    }

    #[test]
    fn test_get_post() {
        let dir = TempDir::new().unwrap();
        write_post(dir.path(), "hello-world.md", WITH_FRONTMATTER);

        let post = PostStore::new(dir.path()).get_post("hello-world").unwrap();
        assert_eq!(post.slug, "hello-world");
        assert!(post.content.is_some());
    }

    #[test]
    fn test_get_post_not_found() {
        let dir = TempDir::new().unwrap();
        let err = PostStore::new(dir.path())
            .get_post("does-not-exist")
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, Error::NotFound { ref slug } if slug == "does-not-exist"));
    }
}
