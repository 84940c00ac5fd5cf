//! ICS feed generation.
//!
//! Output follows RFC 5545 text escaping but is written line by line so the
//! property order and line endings are fixed.

mod generate;

pub use generate::{FeedOptions, escape_text, generate_feed, generate_feed_at, make_uid};
