use crate::config::types::{Config, DatabaseConfig, SourceConfig};
use crate::retry::RetryPolicy;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_database_config(&config.database)?;
    validate_retry_policy(&config.retry)?;
    Ok(())
}

/// Validates the remote API configuration
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", config.base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if let Some(agent) = &config.user_agent {
        if agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user-agent cannot be empty".to_string(),
            ));
        }
    }

    if config.request_timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates database configuration
fn validate_database_config(config: &DatabaseConfig) -> Result<(), ConfigError> {
    if config.path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "database path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_retry_policy(policy: &RetryPolicy) -> Result<(), ConfigError> {
    if policy.max_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max-attempts must be >= 1, got {}",
            policy.max_attempts
        )));
    }
    Ok(())
}
