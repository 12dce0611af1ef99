pub mod download;
pub mod latest_versions;
pub mod pep;
pub mod whats_new;

use crate::adapters::storage::LocalStorage;
use crate::config::ScraperConfig;
use crate::domain::expectations::StatusExpectations;
use crate::domain::model::ParserMode;
use crate::domain::ports::{PageFetcher, Pipeline};
use crate::utils::error::Result;

pub use download::DownloadPipeline;
pub use latest_versions::LatestVersionsPipeline;
pub use pep::PepPipeline;
pub use whats_new::WhatsNewPipeline;

/// Pipeline for `mode`, wired to the configured site and directories.
pub fn build_pipeline<F>(
    mode: ParserMode,
    fetcher: F,
    config: &ScraperConfig,
) -> Result<Box<dyn Pipeline>>
where
    F: PageFetcher + 'static,
{
    let pipeline: Box<dyn Pipeline> = match mode {
        ParserMode::WhatsNew => Box::new(WhatsNewPipeline::new(fetcher, config.docs_url()?)),
        ParserMode::LatestVersions => {
            Box::new(LatestVersionsPipeline::new(fetcher, config.docs_url()?))
        }
        ParserMode::Download => Box::new(DownloadPipeline::new(
            fetcher,
            config.docs_url()?,
            LocalStorage::new(config.downloads_dir().display().to_string()),
        )),
        ParserMode::Pep => Box::new(PepPipeline::new(
            fetcher,
            config.pep_url()?,
            StatusExpectations::default(),
        )),
    };
    Ok(pipeline)
}
