use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::config::{Config, Strategy};
use crate::errors::{FetchError, Result};
use crate::scrapers::base::TrendingFetcher;

/// 排行页面HTML抓取器，两种HTML解析策略共用
pub struct PageFetcher {
    client: Client,
    endpoint: String,
    strategy: Strategy,
}

impl PageFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(FetchError::Request)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            strategy: config.strategy,
        })
    }
}

#[async_trait]
impl TrendingFetcher for PageFetcher {
    fn strategy(&self) -> Strategy {
        self.strategy
    }

    async fn fetch_raw(&self) -> std::result::Result<String, FetchError> {
        debug!("获取排行页面: {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(FetchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let text = response.text().await.map_err(FetchError::Request)?;
        debug!("成功获取页面，{} 字节", text.len());
        Ok(text)
    }
}
