//! Reconciliation of index status codes against the statuses shown on the
//! PEP pages themselves.

use crate::domain::expectations::StatusExpectations;
use crate::domain::model::{ProposalRecord, StatusFrequency};
use crate::domain::ports::PageFetcher;
use crate::utils::error::{Result, ScrapeError};
use crate::utils::html::{find_all, root, text_of};
use crate::utils::progress::page_progress;
use scraper::{ElementRef, Html};
use url::Url;

pub const STATUS_LABEL: &str = "Status:";

/// Outcome of a reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reconciliation {
    pub frequency: StatusFrequency,
    pub processed: usize,
    pub skipped: usize,
    pub mismatched: usize,
}

/// Text of the `dd` following the `dt` labelled `Status:`, untrimmed.
pub fn extract_status(document: &Html) -> Result<String> {
    let label = find_all(root(document), "dt", &[])?
        .into_iter()
        .find(|dt| text_of(*dt).contains(STATUS_LABEL))
        .ok_or_else(|| ScrapeError::tag_not_found(format!("dt containing '{}'", STATUS_LABEL)))?;

    let value = label
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "dd")
        .ok_or_else(|| ScrapeError::tag_not_found(format!("dd after '{}'", STATUS_LABEL)))?;

    Ok(text_of(value))
}

/// Visits every record's page, counts the statuses found there and logs
/// each disagreement with the expectation table.
///
/// Records whose page can't be fetched or parsed are logged and skipped; the
/// `Total` entry is fixed only after the last record.
pub async fn reconcile<F: PageFetcher + ?Sized>(
    fetcher: &F,
    base_url: &Url,
    records: Vec<ProposalRecord>,
    expectations: &StatusExpectations,
) -> Reconciliation {
    let mut outcome = Reconciliation::default();
    let progress = page_progress(records.len(), "PEP pages");

    for record in records {
        progress.inc(1);

        let url = match base_url.join(&record.relative_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(
                    "PEP {}: bad link '{}': {}; skipping",
                    record.number,
                    record.relative_url,
                    e
                );
                outcome.skipped += 1;
                continue;
            }
        };

        let Some(page) = fetcher.fetch(&url).await else {
            tracing::error!(
                "Could not load PEP {}: request to {} failed; skipping",
                record.number,
                url
            );
            outcome.skipped += 1;
            continue;
        };

        let extracted = extract_status(&page.document());
        let full_status = match extracted {
            Ok(status) => status,
            Err(e) => {
                tracing::error!("PEP {} ({}): {}; skipping", record.number, url, e);
                outcome.skipped += 1;
                continue;
            }
        };

        outcome.frequency.increment(&full_status);
        outcome.processed += 1;

        if let Some(mismatch) = expectations.mismatch(&record.status_code, &full_status) {
            tracing::info!(
                "Status mismatch in PEP {}: {}\nStatus on page: {};\nExpected for '{}': [{}].",
                record.number,
                url,
                mismatch.observed,
                mismatch.status_code,
                mismatch.expected_list()
            );
            outcome.mismatched += 1;
        }
    }

    progress.finish_and_clear();
    outcome.frequency.finish();

    tracing::info!(
        "📊 Reconciled {} PEPs ({} skipped, {} mismatched, {} distinct statuses)",
        outcome.processed,
        outcome.skipped,
        outcome.mismatched,
        outcome.frequency.distinct()
    );
    outcome
}
