use crate::utils::error::{Result, ScrapeError};
use chrono::format::{Item, StrftimeItems};
use chrono::{TimeZone, Utc};
use std::fmt::Write;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> ScrapeError {
    ScrapeError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

/// Base URLs are joined with relative links, so they have to end in `/`.
pub fn validate_base_url(field_name: &str, url_str: &str) -> Result<()> {
    validate_url(field_name, url_str)?;
    if !url_str.ends_with('/') {
        return Err(invalid(field_name, url_str, "Base URL must end with '/'"));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            &value.to_string(),
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_datetime_format(field_name: &str, format: &str) -> Result<()> {
    validate_non_empty_string(field_name, format)?;
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(invalid(field_name, format, "Invalid strftime format"));
    }
    // The timestamp ends up in a file name.
    let sample = Utc
        .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
        .single()
        .ok_or_else(|| invalid(field_name, format, "Cannot build sample timestamp"))?;
    let mut rendered = String::new();
    if write!(rendered, "{}", sample.format(format)).is_err() {
        return Err(invalid(field_name, format, "Invalid strftime format"));
    }
    if rendered.contains('/') || rendered.contains(':') {
        return Err(invalid(
            field_name,
            format,
            "Format must not produce path separators or colons",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("docs_url", "https://example.com").is_ok());
        assert!(validate_url("docs_url", "http://example.com").is_ok());
        assert!(validate_url("docs_url", "").is_err());
        assert!(validate_url("docs_url", "invalid-url").is_err());
        assert!(validate_url("docs_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_base_url_requires_trailing_slash() {
        assert!(validate_base_url("pep_url", "https://peps.python.org/").is_ok());
        assert!(validate_base_url("pep_url", "https://docs.python.org/3").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("timeout_seconds", 5, 1).is_ok());
        assert!(validate_positive_number("timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_datetime_format() {
        assert!(validate_datetime_format("datetime_format", "%Y-%m-%d_%H-%M-%S").is_ok());
        assert!(validate_datetime_format("datetime_format", "%Y/%m/%d").is_err());
        assert!(validate_datetime_format("datetime_format", "%Q").is_err());
        assert!(validate_datetime_format("datetime_format", "  ").is_err());
    }

    #[test]
    fn test_datetime_format_must_be_file_name_safe() {
        for format in ["%H:%M", "%R", "%X", "%r", "%D", "%c", "%T", "%Y-%m-%dT%H:%M:%S"] {
            assert!(
                validate_datetime_format("datetime_format", format).is_err(),
                "{} should be rejected",
                format
            );
        }
        assert!(validate_datetime_format("datetime_format", "%Y%m%d_%H%M%S").is_ok());
        assert!(validate_datetime_format("datetime_format", "%s").is_ok());
    }
}
