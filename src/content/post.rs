//! Post model

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::helpers::truncate;

/// Maximum characters kept in a derived excerpt (before the ellipsis)
pub const EXCERPT_LENGTH: usize = 200;

/// Number of body lines joined into a derived excerpt
const EXCERPT_LINES: usize = 2;

/// A blog post
///
/// `content` is only present when the body was requested, so the same type
/// serves both the list metadata and the full record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Slug (file stem), used for lookups and URLs
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date
    pub date: DateTime<FixedOffset>,

    /// Post tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Raw markdown body, trimmed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Short summary, supplied or derived from the body
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub excerpt: String,

    /// `date` as `YYYY-MM-DD`
    pub publish_date: String,
}

/// Turn a slug into a display title: `hello-world` -> `Hello World`
pub fn title_from_slug(slug: &str) -> String {
    let mut title = String::with_capacity(slug.len());
    let mut word_start = true;

    for c in slug.chars() {
        let c = if c == '-' { ' ' } else { c };
        if word_start {
            title.extend(c.to_uppercase());
        } else {
            title.push(c);
        }
        word_start = is_word_separator(c);
    }

    title
}

/// Characters after which a new word starts
///
/// ASCII letters, digits and `_` continue a word; any other ASCII character
/// breaks it. Outside ASCII only whitespace does.
fn is_word_separator(c: char) -> bool {
    if c.is_ascii() {
        !(c.is_ascii_alphanumeric() || c == '_')
    } else {
        c.is_whitespace()
    }
}

/// Derive an excerpt from the first two prose lines of a body
///
/// Blank lines and headings are skipped.
pub fn derive_excerpt(body: &str) -> String {
    let lines: Vec<&str> = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .take(EXCERPT_LINES)
        .collect();

    truncate(&lines.join(" "), EXCERPT_LENGTH)
}
