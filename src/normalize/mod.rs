use std::collections::HashSet;
use std::sync::OnceLock;

use chrono::Local;
use log::debug;
use regex::Regex;

use crate::config::Strategy;
use crate::errors::ParseError;
use crate::models::trending::{TrendingBatch, TrendingRecord, MAX_BATCH};

pub mod fallback;
pub mod html_dom;
pub mod html_regex;
pub mod json;
pub mod units;

fn ticker_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$[A-Z][A-Z0-9]*").unwrap())
}

/// Transform raw upstream content into a trending batch, or explain why
/// nothing could be extracted. Idempotent except for the capture stamp.
pub fn normalize(strategy: Strategy, raw: &str) -> std::result::Result<TrendingBatch, ParseError> {
    let captured_at = Local::now().format("%H:%M:%S").to_string();

    let mut records = match strategy {
        Strategy::JsonApi => json::parse(raw, &captured_at)?,
        Strategy::HtmlDom => html_dom::parse(raw, &captured_at)?,
        Strategy::HtmlRegex => html_regex::parse(raw, &captured_at)?,
    };

    if records.is_empty() {
        return Err(ParseError::NoRecords);
    }

    records.truncate(MAX_BATCH);
    ensure_ranks(&mut records);
    records.sort_by(|a, b| a.rank.cmp(&b.rank));

    debug!("normalized {} records via {}", records.len(), strategy.code());
    Ok(TrendingBatch::new(strategy.code(), records))
}

/// A ticker is recognized only if a `$UPPERCASE` token appears anywhere in
/// the cell text; everything else maps to the "N/A" sentinel.
pub fn extract_ticker(cell: &str) -> String {
    ticker_pattern()
        .find(cell)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

// 行到记录的定位映射，两个HTML策略共用。
// 不足4列的行跳过，不算记录也不算失败。
pub(crate) fn records_from_rows(rows: &[Vec<String>], captured_at: &str) -> Vec<TrendingRecord> {
    let mut records = Vec::new();

    for cells in rows {
        if cells.len() < 4 {
            continue;
        }

        let rank = cells[0]
            .trim()
            .parse::<u32>()
            .unwrap_or(records.len() as u32 + 1);

        records.push(TrendingRecord {
            rank,
            ticker: extract_ticker(&cells[1]),
            messages: cells[2].clone(),
            change: cells[3].clone(),
            since: cells.get(4).cloned().unwrap_or_default(),
            captured_at: captured_at.to_string(),
        });
    }

    records
}

// 批内rank必须唯一；0或重复的rank按位置补齐
fn ensure_ranks(records: &mut [TrendingRecord]) {
    let mut seen = HashSet::new();

    for (i, record) in records.iter_mut().enumerate() {
        let mut rank = record.rank;
        if rank == 0 || seen.contains(&rank) {
            rank = i as u32 + 1;
            while seen.contains(&rank) {
                rank += 1;
            }
        }
        record.rank = rank;
        seen.insert(rank);
    }
}
