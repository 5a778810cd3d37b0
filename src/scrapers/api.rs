use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::config::{Config, Strategy};
use crate::errors::{FetchError, Result};
use crate::scrapers::base::TrendingFetcher;

/// 公开排行JSON接口抓取器
pub struct ApiFetcher {
    client: Client,
    endpoint: String,
    limit: usize,
}

impl ApiFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(FetchError::Request)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            limit: config.limit,
        })
    }
}

#[async_trait]
impl TrendingFetcher for ApiFetcher {
    fn strategy(&self) -> Strategy {
        Strategy::JsonApi
    }

    async fn fetch_raw(&self) -> std::result::Result<String, FetchError> {
        debug!("获取排行JSON: {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("limit", self.limit.to_string())])
            .send()
            .await
            .map_err(FetchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let text = response.text().await.map_err(FetchError::Request)?;
        debug!("成功获取响应，{} 字节", text.len());
        Ok(text)
    }
}
