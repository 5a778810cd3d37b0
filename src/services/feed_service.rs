use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use log::{debug, info, warn};
use tokio::sync::{watch, Mutex};

use crate::config::Config;
use crate::errors::Result;
use crate::models::trending::TrendingBatch;
use crate::normalize::{self, fallback};
use crate::scrapers::{self, base::TrendingFetcher};
use crate::util;

struct CacheEntry {
    bucket: i64,
    batch: TrendingBatch,
}

/// 趋势行情服务：抓取、规整、窗口缓存与失败降级
pub struct FeedService {
    config: Config,
    fetcher: Arc<dyn TrendingFetcher + Send + Sync>,
    cache: Mutex<Option<CacheEntry>>,
}

impl FeedService {
    /// 按配置的策略创建服务实例
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = scrapers::for_config(&config)?;
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Build the service around a specific fetcher instance.
    pub fn with_fetcher(
        config: Config,
        fetcher: Arc<dyn TrendingFetcher + Send + Sync>,
    ) -> Self {
        Self {
            config,
            fetcher,
            cache: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// One cycle's batch. Never fails: repeated calls within one refresh
    /// window reuse the last successful batch (cache key = time bucket),
    /// and any fetch/parse error is downgraded to a warning plus the
    /// configured fallback batch. Nothing propagates past this boundary.
    pub async fn current_batch(&self) -> TrendingBatch {
        let bucket = util::time_bucket(Local::now().timestamp(), self.config.refresh_secs);

        let mut cache = self.cache.lock().await;
        if let Some(entry) = cache.as_ref() {
            if entry.bucket == bucket {
                debug!("reusing cached batch for bucket {}", bucket);
                return entry.batch.clone();
            }
        }

        match self.fetch_batch().await {
            Ok(batch) => {
                info!(
                    "fetched {} trending records via {}",
                    batch.len(),
                    batch.source
                );
                *cache = Some(CacheEntry {
                    bucket,
                    batch: batch.clone(),
                });
                batch
            }
            Err(e) => {
                // 失败不写缓存，直接降级为样例数据
                warn!("trending fetch failed, substituting sample data: {}", e);
                fallback::sample_batch(&self.config.fallback_tickers)
            }
        }
    }

    async fn fetch_batch(&self) -> Result<TrendingBatch> {
        let raw = self.fetcher.fetch_raw().await?;
        let mut batch = normalize::normalize(self.config.strategy, &raw)?;

        // 调试模式：只保留前N条记录
        if self.config.debug_mode && batch.len() > self.config.debug_record_limit {
            let original_count = batch.len();
            batch.records.truncate(self.config.debug_record_limit);
            info!(
                "DEBUG MODE: keeping {} out of {} records",
                batch.len(),
                original_count
            );
        }

        Ok(batch)
    }

    /// Scheduled refresh loop with explicit cancellation: render one batch
    /// immediately, then one per refresh interval, until the stop signal
    /// flips. Replaces an unbounded sleep loop so the host can shut down
    /// cleanly between cycles.
    pub async fn run<F>(&self, mut shutdown: watch::Receiver<bool>, render: F) -> Result<()>
    where
        F: Fn(&TrendingBatch),
    {
        let interval_secs = self.config.refresh_secs.max(1);
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        info!("refresh loop started, interval {}s", interval_secs);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let batch = self.current_batch().await;
                    render(&batch);
                }
                changed = shutdown.changed() => {
                    // 发送端消失同样视为停止
                    if changed.is_err() || *shutdown.borrow() {
                        info!("stop signal received, ending refresh loop");
                        break;
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::config::Strategy;
    use crate::errors::FetchError;

    struct StaticFetcher {
        strategy: Strategy,
        body: std::result::Result<String, u16>,
        calls: AtomicUsize,
    }

    impl StaticFetcher {
        fn ok(strategy: Strategy, body: &str) -> Arc<Self> {
            Arc::new(Self {
                strategy,
                body: Ok(body.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(strategy: Strategy, status: u16) -> Arc<Self> {
            Arc::new(Self {
                strategy,
                body: Err(status),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl TrendingFetcher for StaticFetcher {
        fn strategy(&self) -> Strategy {
            self.strategy
        }

        async fn fetch_raw(&self) -> std::result::Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.body {
                Ok(body) => Ok(body.clone()),
                Err(status) => Err(FetchError::Status(*status)),
            }
        }
    }

    const JSON_BODY: &str = r#"[
        {"symbol": {"symbol": "NVDA"}, "rank": 1, "messages_today": 15400, "change": 4.21},
        {"symbol": {"symbol": "TSLA"}, "rank": 2, "messages_today": 9800, "change": -1.05}
    ]"#;

    // 大刷新窗口，避免测试期间跨越时间桶
    fn test_config(strategy: Strategy) -> Config {
        Config::new(strategy).with_refresh_secs(1_000_000)
    }

    #[tokio::test]
    async fn repeated_calls_within_one_window_fetch_once() {
        let fetcher = StaticFetcher::ok(Strategy::JsonApi, JSON_BODY);
        let service = FeedService::with_fetcher(test_config(Strategy::JsonApi), fetcher.clone());

        let first = service.current_batch().await;
        let second = service.current_batch().await;

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
        assert_eq!(first.tickers(), vec!["NVDA", "TSLA"]);
    }

    #[tokio::test]
    async fn fetch_failure_downgrades_to_fallback_batch() {
        let fetcher = StaticFetcher::failing(Strategy::JsonApi, 503);
        let service = FeedService::with_fetcher(test_config(Strategy::JsonApi), fetcher.clone());

        let batch = service.current_batch().await;

        assert_eq!(batch.source, "sample");
        assert_eq!(batch.tickers(), vec!["$AAPL", "$TSLA", "$NVDA"]);

        // 失败不缓存，下一次调用会重新尝试
        service.current_batch().await;
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn empty_html_yields_documented_fallback_set() {
        let fetcher = StaticFetcher::ok(Strategy::HtmlRegex, "");
        let service = FeedService::with_fetcher(test_config(Strategy::HtmlRegex), fetcher);

        let batch = service.current_batch().await;

        assert_eq!(batch.tickers(), vec!["$AAPL", "$TSLA", "$NVDA"]);
        let ranks: Vec<u32> = batch.records.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn custom_fallback_tickers_are_honored() {
        let fetcher = StaticFetcher::ok(Strategy::HtmlDom, "<html><p>no table</p></html>");
        let config = test_config(Strategy::HtmlDom)
            .with_fallback_tickers(vec!["$GME".to_string(), "$AMC".to_string()]);
        let service = FeedService::with_fetcher(config, fetcher);

        let batch = service.current_batch().await;
        assert_eq!(batch.tickers(), vec!["$GME", "$AMC"]);
    }

    #[tokio::test]
    async fn debug_mode_truncates_records() {
        let fetcher = StaticFetcher::ok(Strategy::JsonApi, JSON_BODY);
        let config = test_config(Strategy::JsonApi)
            .with_debug_mode(true)
            .with_debug_record_limit(1);
        let service = FeedService::with_fetcher(config, fetcher);

        let batch = service.current_batch().await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.tickers(), vec!["NVDA"]);
    }

    #[tokio::test]
    async fn stop_signal_ends_the_refresh_loop() {
        let fetcher = StaticFetcher::failing(Strategy::JsonApi, 500);
        let service = Arc::new(FeedService::with_fetcher(
            test_config(Strategy::JsonApi),
            fetcher,
        ));

        let rendered = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(false);

        let loop_service = service.clone();
        let loop_rendered = rendered.clone();
        let handle = tokio::spawn(async move {
            loop_service
                .run(rx, move |_batch| {
                    loop_rendered.fetch_add(1, Ordering::SeqCst);
                })
                .await
        });

        // 等第一轮渲染完成再发停止信号
        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(true).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("refresh loop did not stop")
            .unwrap();
        assert!(result.is_ok());
        assert_eq!(rendered.load(Ordering::SeqCst), 1);
    }
}
