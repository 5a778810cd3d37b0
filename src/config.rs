use std::str::FromStr;

/// Upstream JSON ranking endpoint (top-20 trending symbols).
pub const API_ENDPOINT: &str = "https://stocktwits.com/rankings/trending.json";

/// Canonical trending page, scraped by both HTML strategies.
pub const PAGE_ENDPOINT: &str = "https://stocktwits.com/rankings/trending";

const USER_AGENT: &str = "Mozilla/5.0 (compatible; trendhub/0.3)";

/// How raw content is acquired and parsed. All strategies share one
/// normalizer contract and one unit-conversion routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    JsonApi,
    HtmlDom,
    HtmlRegex,
}

impl Strategy {
    pub fn code(&self) -> &'static str {
        match self {
            Strategy::JsonApi => "api",
            Strategy::HtmlDom => "html",
            Strategy::HtmlRegex => "html-regex",
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Strategy::JsonApi => API_ENDPOINT,
            Strategy::HtmlDom | Strategy::HtmlRegex => PAGE_ENDPOINT,
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "api" | "json" => Ok(Strategy::JsonApi),
            "html" | "dom" => Ok(Strategy::HtmlDom),
            "html-regex" | "regex" => Ok(Strategy::HtmlRegex),
            _ => Err(format!("Unknown strategy: {}", s)),
        }
    }
}

pub struct Config {
    pub strategy: Strategy,
    pub endpoint: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub refresh_secs: u64,
    pub limit: usize,
    pub fallback_tickers: Vec<String>,
    pub debug_mode: bool,
    pub debug_record_limit: usize,
}

impl Config {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            endpoint: strategy.default_endpoint().to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout_secs: 10,
            refresh_secs: 180,
            limit: 20,
            fallback_tickers: crate::normalize::fallback::DEFAULT_TICKERS
                .iter()
                .map(|t| t.to_string())
                .collect(),
            debug_mode: false,
            debug_record_limit: 10,
        }
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_refresh_secs(mut self, secs: u64) -> Self {
        self.refresh_secs = secs;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_fallback_tickers(mut self, tickers: Vec<String>) -> Self {
        self.fallback_tickers = tickers;
        self
    }

    pub fn with_debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    pub fn with_debug_record_limit(mut self, limit: usize) -> Self {
        self.debug_record_limit = limit;
        self
    }
}
