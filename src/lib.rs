pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{CachedClient, LocalStorage, ReportEmitter, ResponseCache};
pub use app::pipelines::build_pipeline;
pub use config::ScraperConfig;
pub use core::engine::ScrapeEngine;
pub use utils::error::{Result, ScrapeError};
