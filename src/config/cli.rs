use crate::config::ScraperConfig;
use crate::domain::model::{OutputMode, ParserMode};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "docs-scraper")]
#[command(about = "Scraper for the Python documentation and PEP sites")]
pub struct CliConfig {
    /// Parser mode
    #[arg(value_enum)]
    pub mode: ParserMode,

    /// Clear the HTTP cache before running
    #[arg(short, long)]
    pub clear_cache: bool,

    /// Additional output mode (default: plain print)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputMode>,

    /// Path to a TOML settings file
    #[arg(long)]
    pub config: Option<String>,

    /// Directory for results, downloads and the cache
    #[arg(long)]
    pub base_dir: Option<String>,

    #[arg(long)]
    pub docs_url: Option<String>,

    #[arg(long)]
    pub pep_url: Option<String>,

    /// Bypass the HTTP cache
    #[arg(long)]
    pub no_cache: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl CliConfig {
    /// Settings file (or defaults) with command line overrides applied.
    pub fn resolve(&self) -> Result<ScraperConfig> {
        let mut config = match &self.config {
            Some(path) => ScraperConfig::from_file(path)?,
            None => ScraperConfig::default(),
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&self, config: &mut ScraperConfig) {
        if let Some(base_dir) = &self.base_dir {
            config.output.base_dir = base_dir.clone();
        }
        if let Some(docs_url) = &self.docs_url {
            config.site.docs_url = docs_url.clone();
        }
        if let Some(pep_url) = &self.pep_url {
            config.site.pep_url = pep_url.clone();
        }
        if self.no_cache {
            config.cache.enabled = false;
        }
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output.unwrap_or_default()
    }
}
