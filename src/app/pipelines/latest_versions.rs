use crate::domain::model::{ParserMode, Report};
use crate::domain::ports::{PageFetcher, Pipeline};
use crate::utils::error::{Result, ScrapeError};
use crate::utils::html::{attr, find_all, find_tag, root, text_of};
use async_trait::async_trait;
use regex::Regex;
use scraper::Html;
use url::Url;

const VERSION_PATTERN: &str = r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)";

/// Documentation versions listed in the sidebar of the docs start page.
pub struct LatestVersionsPipeline<F: PageFetcher> {
    fetcher: F,
    docs_url: Url,
}

impl<F: PageFetcher> LatestVersionsPipeline<F> {
    pub fn new(fetcher: F, docs_url: Url) -> Self {
        Self { fetcher, docs_url }
    }
}

/// `(link, version, status)` for each entry of the "All versions" list.
///
/// Entries whose text is not `Python X.Y (status)` keep the whole text as
/// version and an empty status.
pub fn parse_versions(document: &Html) -> Result<Vec<[String; 3]>> {
    let sidebar = find_tag(root(document), "div", &[("class", "sphinxsidebarwrapper")])?;
    let versions_list = find_all(sidebar, "ul", &[])?
        .into_iter()
        .find(|ul| text_of(*ul).contains("All versions"))
        .ok_or_else(|| ScrapeError::ProcessingError {
            message: "nothing found: no 'All versions' list in the sidebar".to_string(),
        })?;

    let pattern = Regex::new(VERSION_PATTERN).map_err(|e| ScrapeError::ProcessingError {
        message: e.to_string(),
    })?;

    let mut rows = Vec::new();
    for anchor in find_all(versions_list, "a", &[])? {
        let link = attr(anchor, "href")?.to_string();
        let text = text_of(anchor);
        let (version, status) = match pattern.captures(&text) {
            Some(caps) => (caps["version"].to_string(), caps["status"].to_string()),
            None => (text, String::new()),
        };
        rows.push([link, version, status]);
    }
    Ok(rows)
}

#[async_trait]
impl<F: PageFetcher> Pipeline for LatestVersionsPipeline<F> {
    fn mode(&self) -> ParserMode {
        ParserMode::LatestVersions
    }

    async fn extract(&self) -> Result<Option<Report>> {
        let mut report = Report::new(["Documentation link", "Version", "Status"]);

        let Some(page) = self.fetcher.fetch(&self.docs_url).await else {
            return Ok(Some(report));
        };
        for row in parse_versions(&page.document())? {
            report.push(row);
        }
        tracing::info!("📋 Found {} documentation versions", report.len());

        Ok(Some(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIDEBAR: &str = r#"
        <div class="sphinxsidebar"><div class="sphinxsidebarwrapper">
          <ul><li><a href="/3/download.html">Download</a></li></ul>
          <ul>
            <li><a href="https://docs.python.org/3.14/">Python 3.14 (in development)</a></li>
            <li><a href="https://docs.python.org/3.13/">Python 3.13 (stable)</a></li>
            <li><a href="https://docs.python.org/2.7/">Python 2.7 (EOL)</a></li>
            <li><a href="https://www.python.org/doc/versions/">All versions</a></li>
          </ul>
        </div></div>"#;

    #[test]
    fn test_parse_versions() {
        let doc = Html::parse_document(SIDEBAR);
        let rows = parse_versions(&doc).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(
            rows[1],
            [
                "https://docs.python.org/3.13/".to_string(),
                "3.13".to_string(),
                "stable".to_string()
            ]
        );
        assert_eq!(rows[0][2], "in development");
        assert_eq!(rows[3][1], "All versions");
        assert_eq!(rows[3][2], "");
    }

    #[test]
    fn test_missing_versions_list_is_an_error() {
        let doc = Html::parse_document(
            r#"<div class="sphinxsidebarwrapper"><ul><li><a href="x">Download</a></li></ul></div>"#,
        );
        assert!(matches!(
            parse_versions(&doc),
            Err(ScrapeError::ProcessingError { .. })
        ));
    }
}
