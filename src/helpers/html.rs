//! HTML/XML text helpers

/// Marker appended to truncated text
pub const ELLIPSIS: &str = "...";

/// Escape HTML special characters
///
/// Quotes use numeric entities so the output matches what existing feed
/// consumers have always received.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&#34;"),
            _ => out.push(c),
        }
    }
    out
}

/// Truncate a string to `length` characters, appending `...` when cut
pub fn truncate(s: &str, length: usize) -> String {
    match s.char_indices().nth(length) {
        Some((idx, _)) => format!("{}{}", &s[..idx], ELLIPSIS),
        None => s.to_string(),
    }
}
