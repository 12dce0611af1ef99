use crate::core::pep_index::crawl_index;
use crate::core::pep_status::reconcile;
use crate::domain::expectations::StatusExpectations;
use crate::domain::model::{ParserMode, Report};
use crate::domain::ports::{PageFetcher, Pipeline};
use crate::utils::error::Result;
use async_trait::async_trait;
use url::Url;

/// Frequency of the statuses shown on the PEP pages, checked against the
/// codes of the PEP index.
pub struct PepPipeline<F: PageFetcher> {
    fetcher: F,
    pep_url: Url,
    expectations: StatusExpectations,
}

impl<F: PageFetcher> PepPipeline<F> {
    pub fn new(fetcher: F, pep_url: Url, expectations: StatusExpectations) -> Self {
        Self {
            fetcher,
            pep_url,
            expectations,
        }
    }
}

#[async_trait]
impl<F: PageFetcher> Pipeline for PepPipeline<F> {
    fn mode(&self) -> ParserMode {
        ParserMode::Pep
    }

    async fn extract(&self) -> Result<Option<Report>> {
        let records = crawl_index(&self.fetcher, &self.pep_url).await?;
        let outcome = reconcile(&self.fetcher, &self.pep_url, records, &self.expectations).await;
        Ok(Some(outcome.frequency.to_report()))
    }
}
