use crate::domain::model::{ParserMode, Report};
use crate::utils::error::Result;
use async_trait::async_trait;
use scraper::Html;
use url::Url;

/// A fetched HTML page.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: Url,
    pub body: String,
}

impl Page {
    pub fn new(url: Url, body: impl Into<String>) -> Self {
        Self {
            url,
            body: body.into(),
        }
    }

    pub fn document(&self) -> Html {
        Html::parse_document(&self.body)
    }
}

/// Source of pages. Failures are logged by the implementation and surface
/// as `None`.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Option<Page>;
    async fn fetch_bytes(&self, url: &Url) -> Option<Vec<u8>>;
}

pub trait Storage: Send + Sync {
    fn base_path(&self) -> &str;
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// One parser mode. `Ok(None)` means the mode produced no table.
#[async_trait]
pub trait Pipeline: Send + Sync {
    fn mode(&self) -> ParserMode;
    async fn extract(&self) -> Result<Option<Report>>;
}
