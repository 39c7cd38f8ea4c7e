//! RSS 2.0 feed generation

use chrono::{DateTime, Local, TimeZone};

use crate::content::{Post, EXCERPT_LENGTH};
use crate::helpers::{html_escape, rfc1123z, truncate};

/// Maximum number of items in a feed
pub const FEED_ITEM_LIMIT: usize = 20;

/// Channel language used unless the caller sets one
pub const DEFAULT_LANGUAGE: &str = "en-us";

/// Content type for the serialized feed
pub const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";

/// An RSS channel and its items
#[derive(Debug, Clone, PartialEq)]
pub struct Feed {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: String,
    pub items: Vec<FeedItem>,
}

/// One `<item>` in the feed
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub pub_date: String,
    pub guid: String,
}

impl FeedItem {
    /// Build an item for `post`, linking under `base_url`
    pub fn from_post(post: &Post, base_url: &str) -> Self {
        let link = format!("{}/posts/{}", base_url.trim_end_matches('/'), post.slug);

        // Use excerpt if available, otherwise truncate content
        let description = if !post.excerpt.is_empty() {
            post.excerpt.clone()
        } else {
            post.content
                .as_deref()
                .map(|c| truncate(c, EXCERPT_LENGTH))
                .unwrap_or_default()
        };

        Self {
            title: post.title.clone(),
            guid: link.clone(),
            link,
            description,
            pub_date: rfc1123z(&post.date),
        }
    }
}

/// Build a feed from posts already sorted newest first
///
/// Only the first [`FEED_ITEM_LIMIT`] posts become items.
pub fn build_feed(title: &str, link: &str, description: &str, posts: &[Post]) -> Feed {
    Feed {
        title: title.to_string(),
        link: link.to_string(),
        description: description.to_string(),
        language: DEFAULT_LANGUAGE.to_string(),
        items: posts
            .iter()
            .take(FEED_ITEM_LIMIT)
            .map(|post| FeedItem::from_post(post, link))
            .collect(),
    }
}

impl Feed {
    /// Set the channel language
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    /// Serialize to RSS 2.0 XML, stamped with the current time
    pub fn to_xml(&self) -> String {
        self.to_xml_at(&Local::now())
    }

    /// Serialize to RSS 2.0 XML with an explicit `lastBuildDate`
    ///
    /// Item descriptions go out raw inside CDATA; everything else is
    /// entity-escaped. A `]]>` inside a description is not split.
    pub fn to_xml_at<Tz: TimeZone>(&self, build_date: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        let mut items = String::new();
        for item in &self.items {
            items.push_str(&format!(
                "\n\t\t<item>\
                 \n\t\t\t<title>{}</title>\
                 \n\t\t\t<link>{}</link>\
                 \n\t\t\t<description><![CDATA[{}]]></description>\
                 \n\t\t\t<pubDate>{}</pubDate>\
                 \n\t\t\t<guid>{}</guid>\
                 \n\t\t</item>",
                html_escape(&item.title),
                html_escape(&item.link),
                item.description,
                item.pub_date,
                html_escape(&item.guid),
            ));
        }

        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             \n<rss version=\"2.0\">\
             \n\t<channel>\
             \n\t\t<title>{}</title>\
             \n\t\t<link>{}</link>\
             \n\t\t<description>{}</description>\
             \n\t\t<language>{}</language>\
             \n\t\t<lastBuildDate>{}</lastBuildDate>\
             \n\t\t<generator>Blog API</generator>{}\
             \n\t</channel>\
             \n</rss>",
            html_escape(&self.title),
            html_escape(&self.link),
            html_escape(&self.description),
            html_escape(&self.language),
            rfc1123z(build_date),
            items,
        )
    }
}
