use crate::config::types::{Config, EndpointConfig, HttpConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_http_config(&config.http)?;
    validate_endpoint_config(&config.endpoints)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates request identity and deadlines
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if !(1..=300).contains(&config.timeout_secs) {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    if !(1..=300).contains(&config.connect_timeout_secs) {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be between 1 and 300, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates upstream endpoints
fn validate_endpoint_config(config: &EndpointConfig) -> Result<(), ConfigError> {
    validate_http_url("watch_base", &config.watch_base)?;
    validate_http_url("browse_endpoint", &config.browse_endpoint)?;
    Ok(())
}

/// Validates output paths
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("csv_path", &config.csv_path),
        ("seed_sql_path", &config.seed_sql_path),
        ("seed_json_path", &config.seed_json_path),
    ] {
        if value.is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }

    Ok(())
}

/// Requires an absolute http(s) URL
fn validate_http_url(name: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", name, value, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            name, value
        )));
    }

    Ok(())
}
