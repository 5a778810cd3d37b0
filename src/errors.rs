use thiserror::Error;

/// Errors raised while acquiring raw content from the upstream site.
/// One attempt per cycle, no retry.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(u16),
}

/// Errors raised while turning raw content into a trending batch.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no trending table found in document")]
    TableNotFound,

    #[error("no records extracted from content")]
    NoRecords,
}

#[derive(Error, Debug)]
pub enum TrendHubError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("fetch error: {0}")]
    FetchError(#[from] FetchError),

    #[error("parse error: {0}")]
    ParseError(#[from] ParseError),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

pub type Result<T> = std::result::Result<T, TrendHubError>;

impl From<String> for TrendHubError {
    fn from(s: String) -> Self {
        TrendHubError::Unknown(s)
    }
}

impl From<&str> for TrendHubError {
    fn from(s: &str) -> Self {
        TrendHubError::Unknown(s.to_string())
    }
}
