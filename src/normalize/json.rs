use serde_json::Value;

use crate::errors::ParseError;
use crate::models::trending::TrendingRecord;
use crate::util;

/// Structured input: each symbol entry maps to one record directly,
/// rank falling back to input position when absent.
pub(crate) fn parse(
    raw: &str,
    captured_at: &str,
) -> std::result::Result<Vec<TrendingRecord>, ParseError> {
    let json: Value = serde_json::from_str(raw)?;

    // 顶层可能是数组，也可能包在symbols字段里
    let list = match json.as_array() {
        Some(list) => list,
        None => json
            .get("symbols")
            .and_then(|s| s.as_array())
            .ok_or(ParseError::NoRecords)?,
    };

    let mut records = Vec::new();

    for (i, entry) in list.iter().enumerate() {
        let ticker = match entry.get("symbol") {
            Some(Value::Object(nested)) => nested
                .get("symbol")
                .and_then(|s| s.as_str())
                .unwrap_or("N/A")
                .to_string(),
            Some(Value::String(flat)) => flat.clone(),
            _ => "N/A".to_string(),
        };

        let rank = entry
            .get("rank")
            .and_then(|r| r.as_u64())
            .unwrap_or(i as u64 + 1) as u32;

        let messages = match entry.get("messages_today") {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s.clone(),
            _ => "0".to_string(),
        };

        let change = match entry.get("change") {
            Some(Value::Number(n)) => format!("{:+.2}%", n.as_f64().unwrap_or_default()),
            Some(Value::String(s)) => s.clone(),
            _ => "0.00%".to_string(),
        };

        // 缺失时间戳 -> "Just now"哨兵
        let since = entry
            .get("updated_at")
            .and_then(|u| u.as_str())
            .and_then(util::format_eastern)
            .unwrap_or_else(|| "Just now".to_string());

        records.push(TrendingRecord {
            rank,
            ticker,
            messages,
            change,
            since,
            captured_at: captured_at.to_string(),
        });
    }

    Ok(records)
}
