use chrono::DateTime;
use chrono_tz::US::Eastern;

// 时间显示转换：ISO-8601时间戳 -> 美东"HH:MM ET"显示
pub fn format_eastern(iso: &str) -> Option<String> {
    let parsed = DateTime::parse_from_rfc3339(iso).ok()?;
    Some(parsed.with_timezone(&Eastern).format("%H:%M ET").to_string())
}

// 缓存键：同一刷新窗口内的重复请求复用同一批数据
pub fn time_bucket(now_unix: i64, interval_secs: u64) -> i64 {
    if interval_secs == 0 {
        return now_unix;
    }
    now_unix / interval_secs as i64
}

// HTML实体还原
pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ").replace("&amp;", "&")
}

// 压缩连续空白为单个空格
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_eastern_converts_utc_timestamps() {
        // January is EST (UTC-5)
        assert_eq!(
            format_eastern("2024-01-15T14:30:00Z").as_deref(),
            Some("09:30 ET")
        );
        // July is EDT (UTC-4)
        assert_eq!(
            format_eastern("2024-07-15T14:30:00Z").as_deref(),
            Some("10:30 ET")
        );
    }

    #[test]
    fn format_eastern_rejects_garbage() {
        assert_eq!(format_eastern("just now"), None);
        assert_eq!(format_eastern(""), None);
    }

    #[test]
    fn time_bucket_is_stable_within_a_window() {
        assert_eq!(time_bucket(1000, 180), time_bucket(1179, 180));
        assert_ne!(time_bucket(1000, 180), time_bucket(1180, 180));
        assert_eq!(time_bucket(42, 0), 42);
    }

    #[test]
    fn normalize_ws_collapses_runs() {
        assert_eq!(normalize_ws("  1.2K \n\t messages "), "1.2K messages");
        assert_eq!(normalize_entities("A&nbsp;&amp;&nbsp;B"), "A & B");
    }
}
