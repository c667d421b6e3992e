use std::time::Duration;

use super::FeedError;

pub struct FeedClient {
    client: reqwest::blocking::Client,
}

impl FeedClient {
    pub fn new(timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("feedpeek")
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// GET `url` and return the whole body. No retries.
    pub fn fetch(&self, url: &str) -> Result<Vec<u8>, FeedError> {
        tracing::info!(url, "fetching feed");
        let resp = self.client.get(url).send()?.error_for_status()?;
        let body = resp.bytes()?;
        tracing::debug!(url, bytes = body.len(), "feed fetched");
        Ok(body.to_vec())
    }
}
