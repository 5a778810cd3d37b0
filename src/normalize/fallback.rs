use chrono::Local;

use crate::models::trending::{TrendingBatch, TrendingRecord, MAX_BATCH};

/// Default fallback ticker set, overridable through the config.
pub const DEFAULT_TICKERS: [&str; 3] = ["$AAPL", "$TSLA", "$NVDA"];

// 固定样例行 (volume, change, since)，配置的代码数超出时循环使用
const SAMPLE_ROWS: [(&str, &str, &str); 10] = [
    ("12.4K messages", "+5.32%", "2h ago"),
    ("9.8K messages", "+3.10%", "4h ago"),
    ("7.5K messages", "-1.25%", "6h ago"),
    ("5.2K messages", "+0.85%", "8h ago"),
    ("4.9K messages", "-0.40%", "9h ago"),
    ("3.3K messages", "+2.15%", "11h ago"),
    ("2.8K messages", "+0.05%", "12h ago"),
    ("2.1K messages", "-2.60%", "14h ago"),
    ("1.6K messages", "+1.90%", "16h ago"),
    ("980 messages", "-0.75%", "18h ago"),
];

/// Deterministic substitute batch so the display layer never renders empty.
/// Same record shape as live data, ranks 1..N in configured ticker order.
pub fn sample_batch(tickers: &[String]) -> TrendingBatch {
    let captured_at = Local::now().format("%H:%M:%S").to_string();

    let records = tickers
        .iter()
        .take(MAX_BATCH)
        .enumerate()
        .map(|(i, ticker)| {
            let (messages, change, since) = SAMPLE_ROWS[i % SAMPLE_ROWS.len()];
            TrendingRecord {
                rank: i as u32 + 1,
                ticker: ticker.clone(),
                messages: messages.to_string(),
                change: change.to_string(),
                since: since.to_string(),
                captured_at: captured_at.clone(),
            }
        })
        .collect();

    TrendingBatch::new("sample", records)
}
