//! Fetching and decoding the RSS feed.

use std::time::Duration;

mod client;
mod parse;
mod types;

pub use self::client::FeedClient;
pub use self::parse::parse_feed;
pub use self::types::{Feed, Item};

pub const DEFAULT_FEED_URL: &str = "https://rss.politico.com/playbook.xml";

/// Upper bound for a single feed GET, connect through body read.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("fetch feed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("parse feed: {0}")]
    Parse(String),
}

impl FeedError {
    pub fn is_fetch(&self) -> bool {
        matches!(self, FeedError::Fetch(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, FeedError::Parse(_))
    }
}

/// Fetch `url` with the default client and decode the body.
pub fn fetch_feed(url: &str) -> Result<Feed, FeedError> {
    let client = FeedClient::new(FETCH_TIMEOUT)?;
    let bytes = client.fetch(url)?;
    parse_feed(&bytes)
}
