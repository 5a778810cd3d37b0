use scraper::{Html, Selector};

use crate::errors::ParseError;
use crate::models::trending::TrendingRecord;
use crate::util;

/// Structured HTML input: walk the first `<table>` in the document and map
/// each row's cell texts positionally.
pub(crate) fn parse(
    raw: &str,
    captured_at: &str,
) -> std::result::Result<Vec<TrendingRecord>, ParseError> {
    let document = Html::parse_document(raw);

    let table_selector = Selector::parse("table").unwrap();
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("td").unwrap();

    let table = document
        .select(&table_selector)
        .next()
        .ok_or(ParseError::TableNotFound)?;

    // 表头行只有th单元格，取td时自然被跳过
    let mut rows = Vec::new();
    for tr in table.select(&row_selector) {
        let cells: Vec<String> = tr
            .select(&cell_selector)
            .take(5)
            .map(|td| util::normalize_ws(&td.text().collect::<Vec<_>>().concat()))
            .collect();
        rows.push(cells);
    }

    Ok(super::records_from_rows(&rows, captured_at))
}
