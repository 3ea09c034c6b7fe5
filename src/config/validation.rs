use crate::config::types::{Config, HttpConfig, SourceEntry};
use crate::extract::Extractor;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_http_config(&config.http)?;

    if config.sources.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[source]] entry is required".to_string(),
        ));
    }

    for entry in &config.sources {
        validate_source(entry)?;
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates a single source entry, including its extractor
fn validate_source(entry: &SourceEntry) -> Result<(), ConfigError> {
    validate_site(&entry.site)?;

    if entry.pages.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Source '{}' must have at least one page",
            entry.site
        )));
    }

    for page in &entry.pages {
        if page.is_empty() {
            return Err(ConfigError::Validation(format!(
                "Source '{}' has an empty page path",
                entry.site
            )));
        }
    }

    for name in entry.headers.keys() {
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ConfigError::Validation(format!(
                "Source '{}' has an invalid header name '{}'",
                entry.site, name
            )));
        }
    }

    Extractor::from_config(&entry.extractor)?;

    Ok(())
}

/// Validates a site base address: absolute http(s) URL without query or fragment
fn validate_site(site: &str) -> Result<(), ConfigError> {
    let url = Url::parse(site)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid site '{}': {}", site, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Site '{}' must use http or https",
            site
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Site '{}' has no host",
            site
        )));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidUrl(format!(
            "Site '{}' must not carry a query or fragment; put it in the page path",
            site
        )));
    }

    Ok(())
}
