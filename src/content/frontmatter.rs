//! Front-matter parsing
//!
//! Posts carry a small `key: value` block between `---` lines. This is a
//! restricted line-oriented grammar, not YAML: no nesting, no multi-line
//! scalars, and only the first colon on a line separates key from value.

use chrono::{DateTime, FixedOffset};
use lazy_static::lazy_static;
use regex::Regex;

use crate::helpers::parse_date;

lazy_static! {
    /// Opening `---`, the block, a closing `---` on its own line, then the body
    static ref FRONT_MATTER_RE: Regex =
        Regex::new(r"(?s)\A---\s*\n(.*?)\n---\s*\n(.*)").expect("front-matter regex");
}

/// Front-matter data from a post
///
/// Every field is optional; the loader applies fallbacks for missing ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<DateTime<FixedOffset>>,
    pub tags: Vec<String>,
    pub excerpt: Option<String>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// When the content does not open with a complete `---` block, the
    /// whole input is returned as the body.
    pub fn parse(content: &str) -> (Self, &str) {
        match FRONT_MATTER_RE.captures(content) {
            Some(caps) => {
                let block = caps.get(1).map_or("", |m| m.as_str());
                let body = caps.get(2).map_or("", |m| m.as_str());
                (Self::parse_block(block), body)
            }
            None => (FrontMatter::default(), content),
        }
    }

    /// Parse the lines between the delimiters
    ///
    /// Duplicate keys: the last occurrence wins. A `date` that fails to
    /// parse is ignored, so an earlier valid date is kept.
    fn parse_block(block: &str) -> Self {
        let mut fm = FrontMatter::default();

        for line in block.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = unquote(value.trim());

            match key.trim() {
                "title" => fm.title = Some(value.to_string()),
                "date" => {
                    if let Some(date) = parse_date(value) {
                        fm.date = Some(date);
                    } else {
                        tracing::debug!("Ignoring unparseable front-matter date {:?}", value);
                    }
                }
                "tags" => fm.tags = parse_tags(value),
                "excerpt" => fm.excerpt = Some(value.to_string()),
                _ => {}
            }
        }

        fm
    }
}

/// Strip one layer of matching `"` or `'` quotes
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Parse `["a", "b"]` or `a, b` into a tag list
fn parse_tags(value: &str) -> Vec<String> {
    let is_quote = |c: char| c == '"' || c == '\'';

    if value.starts_with('[') && value.ends_with(']') {
        value
            .trim_matches(|c| c == '[' || c == ']')
            .split(',')
            .map(|tag| tag.trim().trim_matches(is_quote))
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect()
    } else {
        value
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect()
    }
}
