use std::sync::Arc;

use crate::config::{Config, Strategy};
use crate::errors::Result;

pub mod api;
pub mod base;
pub mod page;

use api::ApiFetcher;
use base::TrendingFetcher;
use page::PageFetcher;

/// Build the fetcher for the configured strategy. Both HTML strategies
/// read the same canonical page; only the parse step differs.
pub fn for_config(config: &Config) -> Result<Arc<dyn TrendingFetcher + Send + Sync>> {
    let fetcher: Arc<dyn TrendingFetcher + Send + Sync> = match config.strategy {
        Strategy::JsonApi => Arc::new(ApiFetcher::new(config)?),
        Strategy::HtmlDom | Strategy::HtmlRegex => Arc::new(PageFetcher::new(config)?),
    };
    Ok(fetcher)
}
