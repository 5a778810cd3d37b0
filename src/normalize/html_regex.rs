use std::sync::OnceLock;

use regex::Regex;

use crate::errors::ParseError;
use crate::models::trending::TrendingRecord;
use crate::util;

fn table_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<table[^>]*>(.*?)</table>").unwrap())
}

fn row_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<tr[^>]*>(.*?)</tr>").unwrap())
}

fn cell_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<td[^>]*>(.*?)</td>").unwrap())
}

fn tag_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
}

/// Pattern-based rendition of the same table contract: slice the first
/// table block out of the raw markup, then rows, then cells. Kept separate
/// from the DOM walk so upstream markup drift breaks at most one strategy.
pub(crate) fn parse(
    raw: &str,
    captured_at: &str,
) -> std::result::Result<Vec<TrendingRecord>, ParseError> {
    let table = table_pattern()
        .captures(raw)
        .and_then(|c| c.get(1))
        .ok_or(ParseError::TableNotFound)?
        .as_str();

    let mut rows = Vec::new();
    for row in row_pattern().captures_iter(table) {
        let body = row.get(1).map(|m| m.as_str()).unwrap_or_default();
        let cells: Vec<String> = cell_pattern()
            .captures_iter(body)
            .take(5)
            .map(|c| clean_cell(c.get(1).map(|m| m.as_str()).unwrap_or_default()))
            .collect();
        rows.push(cells);
    }

    Ok(super::records_from_rows(&rows, captured_at))
}

// 去标签、还原实体、压缩空白
fn clean_cell(markup: &str) -> String {
    let text = tag_pattern().replace_all(markup, " ");
    util::normalize_ws(&util::normalize_entities(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Strategy;
    use crate::normalize::normalize;

    const FIXTURE: &str = r#"
        <html><body>
        <TABLE class="trending">
          <tr><th>Rank</th><th>Symbol</th><th>Messages</th><th>Change</th><th>Since</th></tr>
          <tr><td>1</td><td><a href="/symbol/NVDA">$NVDA</a></td><td>15.4K&nbsp;messages</td><td>+4.21%</td><td>09:15 ET</td></tr>
          <tr><td>2</td><td><a href="/symbol/TSLA">$TSLA</a></td><td>9.8K messages</td><td>-1.05%</td><td>08:40 ET</td></tr>
        </TABLE>
        <table><tr><td>9</td><td>$JUNK</td><td>1</td><td>1%</td></tr></table>
        </body></html>
    "#;

    #[test]
    fn slices_only_the_first_table_block() {
        let records = parse(FIXTURE, "09:30:00").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].ticker, "$NVDA");
        assert_eq!(records[0].messages, "15.4K messages");
        assert_eq!(records[1].ticker, "$TSLA");
    }

    #[test]
    fn strips_markup_and_entities_from_cells() {
        assert_eq!(clean_cell("<a href=\"/x\"><b>$NVDA</b></a>"), "$NVDA");
        assert_eq!(clean_cell("15.4K&nbsp;messages"), "15.4K messages");
        assert_eq!(clean_cell("A&amp;B"), "A&B");
    }

    #[test]
    fn missing_table_is_a_parse_error() {
        assert!(matches!(
            parse("<html><body>no table</body></html>", "09:30:00"),
            Err(ParseError::TableNotFound)
        ));
        assert!(matches!(parse("", "09:30:00"), Err(ParseError::TableNotFound)));
    }

    #[test]
    fn agrees_with_the_dom_strategy_on_well_formed_markup() {
        let dom = normalize(Strategy::HtmlDom, FIXTURE).unwrap();
        let rx = normalize(Strategy::HtmlRegex, FIXTURE).unwrap();

        let rows = |b: &crate::models::trending::TrendingBatch| {
            b.records
                .iter()
                .map(|r| (r.rank, r.ticker.clone(), r.messages.clone(), r.change.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(rows(&dom), rows(&rx));
    }
}
