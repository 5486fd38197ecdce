use crate::error::Result;
use async_trait::async_trait;

/// Retrieval seam for remote-fetch mode.
///
/// Implementations perform exactly one bounded attempt per call; the builder
/// never retries.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpGetResult>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}
