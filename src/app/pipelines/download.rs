use crate::domain::model::{ParserMode, Report};
use crate::domain::ports::{PageFetcher, Pipeline, Storage};
use crate::utils::error::{Result, ScrapeError};
use crate::utils::html::{attr, find_tag, find_tag_by_selector, root};
use async_trait::async_trait;
use scraper::Html;
use std::io::Cursor;
use url::Url;

const ARCHIVE_SELECTOR: &str = r#"a[href$="pdf-a4.zip"]"#;

/// Saves the A4 PDF documentation archive into the downloads storage.
pub struct DownloadPipeline<F: PageFetcher, S: Storage> {
    fetcher: F,
    docs_url: Url,
    storage: S,
}

impl<F: PageFetcher, S: Storage> DownloadPipeline<F, S> {
    pub fn new(fetcher: F, docs_url: Url, storage: S) -> Self {
        Self {
            fetcher,
            docs_url,
            storage,
        }
    }
}

/// Absolute URL of the A4 PDF archive listed on the downloads page.
pub fn find_archive_link(document: &Html, page_url: &Url) -> Result<Url> {
    let main = find_tag(root(document), "div", &[("role", "main")])?;
    let table = find_tag(main, "table", &[("class", "docutils")])?;
    let anchor = find_tag_by_selector(table, ARCHIVE_SELECTOR)?;
    Ok(page_url.join(attr(anchor, "href")?)?)
}

pub fn archive_file_name(archive_url: &Url) -> Result<String> {
    archive_url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ScrapeError::ProcessingError {
            message: format!("no file name in {}", archive_url),
        })
}

#[async_trait]
impl<F: PageFetcher, S: Storage> Pipeline for DownloadPipeline<F, S> {
    fn mode(&self) -> ParserMode {
        ParserMode::Download
    }

    async fn extract(&self) -> Result<Option<Report>> {
        let downloads_url = self.docs_url.join("download.html")?;

        let Some(page) = self.fetcher.fetch(&downloads_url).await else {
            tracing::info!("Archive was NOT downloaded: request to {} failed", downloads_url);
            return Ok(None);
        };
        let archive_url = find_archive_link(&page.document(), &page.url)?;
        let file_name = archive_file_name(&archive_url)?;

        let Some(data) = self.fetcher.fetch_bytes(&archive_url).await else {
            tracing::info!("Archive was NOT downloaded: request to {} failed", archive_url);
            return Ok(None);
        };

        match zip::ZipArchive::new(Cursor::new(data.as_slice())) {
            Ok(archive) => tracing::debug!("Archive {} holds {} files", file_name, archive.len()),
            Err(e) => tracing::warn!("{} does not look like a zip archive: {}", file_name, e),
        }

        let path = self.storage.write_file(&file_name, &data).await?;
        tracing::info!("💾 Archive was downloaded and saved: {}", path);

        Ok(None)
    }
}
