use crate::adapters::output::DEFAULT_DATETIME_FORMAT;
use crate::utils::error::{Result, ScrapeError};
use crate::utils::validation::{
    validate_base_url, validate_datetime_format, validate_non_empty_string, validate_path,
    validate_positive_number, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const MAIN_DOC_URL: &str = "https://docs.python.org/3/";
pub const MAIN_PEP_URL: &str = "https://peps.python.org/";

/// Settings file. Every section and key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub site: SiteConfig,
    pub output: OutputConfig,
    pub http: HttpConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub docs_url: String,
    pub pep_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            docs_url: MAIN_DOC_URL.to_string(),
            pep_url: MAIN_PEP_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory that relative result, download and cache paths hang off.
    pub base_dir: String,
    pub results_dir: String,
    pub downloads_dir: String,
    pub datetime_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_dir: ".".to_string(),
            results_dir: "results".to_string(),
            downloads_dir: "downloads".to_string(),
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: concat!("docs-scraper/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub dir: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: ".http_cache".to_string(),
        }
    }
}

impl ScraperConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ScrapeError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: ScraperConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn docs_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.site.docs_url)?)
    }

    pub fn pep_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.site.pep_url)?)
    }

    fn under_base(&self, dir: &str) -> PathBuf {
        Path::new(&self.output.base_dir).join(dir)
    }

    pub fn results_dir(&self) -> PathBuf {
        self.under_base(&self.output.results_dir)
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.under_base(&self.output.downloads_dir)
    }

    pub fn cache_dir(&self) -> Option<PathBuf> {
        self.cache.enabled.then(|| self.under_base(&self.cache.dir))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }
}

fn normalized(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

impl Validate for ScraperConfig {
    fn validate(&self) -> Result<()> {
        validate_base_url("site.docs_url", &self.site.docs_url)?;
        validate_base_url("site.pep_url", &self.site.pep_url)?;
        validate_path("output.base_dir", &self.output.base_dir)?;
        validate_path("output.results_dir", &self.output.results_dir)?;
        validate_path("output.downloads_dir", &self.output.downloads_dir)?;
        validate_datetime_format("output.datetime_format", &self.output.datetime_format)?;
        validate_positive_number("http.timeout_seconds", self.http.timeout_seconds, 1)?;
        validate_non_empty_string("http.user_agent", &self.http.user_agent)?;
        if self.cache.enabled {
            validate_path("cache.dir", &self.cache.dir)?;
            let cache_dir = normalized(&self.under_base(&self.cache.dir));
            for (name, dir) in [
                ("output.results_dir", self.results_dir()),
                ("output.downloads_dir", self.downloads_dir()),
            ] {
                if normalized(&dir) == cache_dir {
                    return Err(ScrapeError::InvalidConfigValueError {
                        field: "cache.dir".to_string(),
                        value: self.cache.dir.clone(),
                        reason: format!("must not be the same directory as {}", name),
                    });
                }
            }
        }
        Ok(())
    }
}
