pub mod engine;
pub mod pep_index;
pub mod pep_status;

pub use crate::domain::model::{ProposalRecord, Report, StatusFrequency};
pub use crate::domain::ports::{PageFetcher, Pipeline, Storage};
pub use crate::utils::error::Result;
