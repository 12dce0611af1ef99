use crate::adapters::output::ReportEmitter;
use crate::domain::ports::{Pipeline, Storage};
use crate::utils::error::Result;

/// Runs one parser mode and emits its report.
pub struct ScrapeEngine<S: Storage> {
    pipeline: Box<dyn Pipeline>,
    emitter: ReportEmitter<S>,
}

impl<S: Storage> ScrapeEngine<S> {
    pub fn new(pipeline: Box<dyn Pipeline>, emitter: ReportEmitter<S>) -> Self {
        Self { pipeline, emitter }
    }

    /// Returns the results file path when the report went to a file.
    pub async fn run(&self) -> Result<Option<String>> {
        let mode = self.pipeline.mode();
        tracing::info!("🚀 Running {} parser", mode);

        let Some(report) = self.pipeline.extract().await? else {
            tracing::debug!("{} produced no report", mode);
            return Ok(None);
        };
        tracing::debug!("Extracted {} rows", report.len());

        self.emitter.emit(mode, &report).await
    }
}
