//! Helper functions shared by the post store and the feed builder

mod date;
mod html;

pub use date::*;
pub use html::*;
