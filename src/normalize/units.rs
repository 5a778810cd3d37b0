use std::sync::OnceLock;

use regex::Regex;

fn volume_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([0-9]*\.?[0-9]+)\s*([KMB])?").unwrap())
}

/// Unit normalization: turn a display string like "1.2K messages" into a
/// raw numeric value for charting. K/M/B suffixes scale by 1e3/1e6/1e9;
/// no recognizable numeral yields 0.0.
pub fn volume_value(display: &str) -> f64 {
    // 上游数字可能带千位分隔符
    let cleaned = display.replace(',', "");

    let caps = match volume_pattern().captures(&cleaned) {
        Some(caps) => caps,
        None => return 0.0,
    };

    let number = caps
        .get(1)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0);

    let multiplier = match caps.get(2).map(|m| m.as_str()) {
        Some("K") => 1e3,
        Some("M") => 1e6,
        Some("B") => 1e9,
        _ => 1.0,
    };

    number * multiplier
}
