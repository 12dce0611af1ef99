//! Crawl of the PEP index page into [`ProposalRecord`]s.

use crate::domain::model::ProposalRecord;
use crate::domain::ports::PageFetcher;
use crate::utils::error::{Result, ScrapeError};
use crate::utils::html::{find_all, root, text_of};
use scraper::Html;
use url::Url;

pub const INDEX_TABLE_CLASS: &str = "pep-zero-table";

/// Status character of the index type/status cell (`"PA"` -> `"A"`).
///
/// The cell is assumed to read `<type><status>`; a shorter cell yields an
/// empty code, which the expectation table treats as a draft.
pub fn parse_status_code(cell_text: &str) -> String {
    cell_text.chars().nth(1).map(String::from).unwrap_or_default()
}

/// PEP number from the index cell: ASCII digits only, greater than zero.
pub fn parse_pep_number(cell_text: &str) -> Option<u32> {
    if cell_text.is_empty() || !cell_text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    cell_text.parse::<u32>().ok().filter(|n| *n > 0)
}

/// Extracts records from every index table, in table then row order.
///
/// A page without index tables is an error; malformed rows are skipped.
pub fn parse_index(document: &Html) -> Result<Vec<ProposalRecord>> {
    let tables = find_all(root(document), "table", &[("class", INDEX_TABLE_CLASS)])?;
    if tables.is_empty() {
        return Err(ScrapeError::tag_not_found(format!(
            "table.{}",
            INDEX_TABLE_CLASS
        )));
    }

    let mut records = Vec::new();
    for (table_idx, table) in tables.into_iter().enumerate() {
        let table_no = table_idx + 1;
        let rows = find_all(table, "tr", &[])?;

        // first row is the header
        for (row_idx, row) in rows.into_iter().enumerate().skip(1) {
            let row_no = row_idx + 1;
            let cells = find_all(row, "td", &[])?;
            if cells.len() < 2 {
                tracing::info!(
                    "Row {} of table {} has less than 2 columns; skipping",
                    row_no,
                    table_no
                );
                continue;
            }

            let status_code = parse_status_code(&text_of(cells[0]));

            let Some(number) = parse_pep_number(&text_of(cells[1])) else {
                tracing::info!(
                    "Row {} of table {}: can not detect PEP number; skipping",
                    row_no,
                    table_no
                );
                continue;
            };

            let Some(anchor) = find_all(cells[1], "a", &[])?.into_iter().next() else {
                tracing::info!(
                    "Row {} of table {}: can not find anchor element; skipping",
                    row_no,
                    table_no
                );
                continue;
            };

            let Some(href) = anchor.value().attr("href") else {
                tracing::info!(
                    "Row {} of table {}: can not get href attribute; skipping",
                    row_no,
                    table_no
                );
                continue;
            };

            records.push(ProposalRecord {
                number,
                relative_url: href.to_string(),
                status_code,
            });
        }
    }

    Ok(records)
}

/// Fetches the index page and extracts its records.
///
/// A failed fetch is logged and yields no records.
pub async fn crawl_index<F: PageFetcher + ?Sized>(
    fetcher: &F,
    index_url: &Url,
) -> Result<Vec<ProposalRecord>> {
    let Some(page) = fetcher.fetch(index_url).await else {
        tracing::error!("Could not load the PEP index: request to {} failed", index_url);
        return Ok(Vec::new());
    };

    let records = parse_index(&page.document())?;
    tracing::info!("📋 Found {} PEPs in the index", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_page(rows: &str) -> Html {
        Html::parse_document(&format!(
            r#"<html><body>
            <table class="pep-zero-table docutils align-default">
              <thead><tr><th></th><th>PEP</th><th>Title</th></tr></thead>
              <tbody>{}</tbody>
            </table>
            </body></html>"#,
            rows
        ))
    }

    #[test]
    fn test_parse_status_code() {
        assert_eq!(parse_status_code("PA"), "A");
        assert_eq!(parse_status_code("SF"), "F");
        assert_eq!(parse_status_code("I"), "");
        assert_eq!(parse_status_code(""), "");
        assert_eq!(parse_status_code("IDX"), "D");
    }

    #[test]
    fn test_parse_pep_number() {
        assert_eq!(parse_pep_number("101"), Some(101));
        assert_eq!(parse_pep_number("0008"), Some(8));
        assert_eq!(parse_pep_number("0"), None);
        assert_eq!(parse_pep_number("abc"), None);
        assert_eq!(parse_pep_number(""), None);
        assert_eq!(parse_pep_number(" 12"), None);
        assert_eq!(parse_pep_number("-5"), None);
        assert_eq!(parse_pep_number("99999999999"), None);
    }

    #[test]
    fn test_single_row() {
        let doc = index_page(
            r#"<tr><td><abbr title="Process, Active">PA</abbr></td>
                   <td><a class="pep reference internal" href="pep-0101/">101</a></td>
                   <td>Doing Python Releases 101</td></tr>"#,
        );
        let records = parse_index(&doc).unwrap();
        assert_eq!(
            records,
            vec![ProposalRecord {
                number: 101,
                relative_url: "pep-0101/".to_string(),
                status_code: "A".to_string(),
            }]
        );
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let doc = index_page(
            r#"<tr><td>PA</td></tr>
               <tr><td>PA</td><td><a href="pep-abc/">abc</a></td></tr>
               <tr><td>PF</td><td>8</td></tr>
               <tr><td>PF</td><td><a name="no-href">9</a></td></tr>
               <tr><td>SF</td><td><a href="pep-0010/">10</a></td></tr>"#,
        );
        let records = parse_index(&doc).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].number, 10);
        assert_eq!(records[0].status_code, "F");
    }

    #[test]
    fn test_tables_are_walked_in_order_without_dedup() {
        let doc = Html::parse_document(
            r#"<html><body>
            <table class="pep-zero-table"><tr><th>h</th></tr>
              <tr><td>IF</td><td><a href="pep-0002/">2</a></td></tr></table>
            <table class="other"><tr><th>h</th></tr>
              <tr><td>IA</td><td><a href="pep-0003/">3</a></td></tr></table>
            <table class="pep-zero-table"><tr><th>h</th></tr>
              <tr><td>S</td><td><a href="pep-0001/">1</a></td></tr>
              <tr><td>IF</td><td><a href="pep-0002/">2</a></td></tr></table>
            </body></html>"#,
        );
        let records = parse_index(&doc).unwrap();
        let numbers: Vec<u32> = records.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![2, 1, 2]);
        assert_eq!(records[1].status_code, "");
    }

    #[test]
    fn test_missing_index_tables_is_fatal() {
        let doc = Html::parse_document("<html><body><p>maintenance</p></body></html>");
        let err = parse_index(&doc).unwrap_err();
        assert!(matches!(err, ScrapeError::TagNotFound { .. }));
    }

    #[test]
    fn test_header_only_table_yields_nothing() {
        let doc = index_page("");
        assert!(parse_index(&doc).unwrap().is_empty());
    }
}
