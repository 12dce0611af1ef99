use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Tag not found: {selector}")]
    TagNotFound { selector: String },

    #[error("Attribute '{attribute}' missing on <{tag}>")]
    MissingAttribute { tag: String, attribute: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Structure,
    Storage,
    Configuration,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScrapeError {
    pub fn tag_not_found(selector: impl Into<String>) -> Self {
        Self::TagNotFound {
            selector: selector.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) | Self::UrlError(_) => ErrorCategory::Network,
            Self::TagNotFound { .. } | Self::MissingAttribute { .. } => ErrorCategory::Structure,
            Self::ZipError(_) | Self::CsvError(_) | Self::IoError(_) => ErrorCategory::Storage,
            Self::TomlParseError(_)
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::SerializationError(_) | Self::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Structure | ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Storage | ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the network connection and the site URLs, then retry",
            ErrorCategory::Structure => {
                "The page layout may have changed; rerun with --clear-cache to refetch it"
            }
            ErrorCategory::Storage => "Check that the output directories are writable",
            ErrorCategory::Configuration => "Fix the configuration file or command line arguments",
            ErrorCategory::Processing => "Rerun with --verbose and inspect the log",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::TagNotFound { selector } => {
                format!("Expected element '{}' was not found on the page", selector)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
