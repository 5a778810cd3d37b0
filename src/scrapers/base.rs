use async_trait::async_trait;

use crate::config::Strategy;
use crate::errors::FetchError;

/// Base trait for raw-content fetchers
#[async_trait]
pub trait TrendingFetcher {
    /// Which acquisition strategy this fetcher serves
    fn strategy(&self) -> Strategy;

    /// Fetch raw content (JSON payload or HTML page) from the upstream
    /// endpoint. Single attempt with a fixed timeout; no retry within a
    /// cycle, no side effect beyond the network call.
    async fn fetch_raw(&self) -> std::result::Result<String, FetchError>;
}
