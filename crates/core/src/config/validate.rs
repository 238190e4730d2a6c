use super::{types::Config, AuthMethod, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Auth section exists (enforced by serde)
/// - API key auth has a non-empty key
/// - Server port is not 0
/// - Pagination limits are internally consistent
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Auth validation
    if config.auth.method == AuthMethod::ApiKey
        && config.auth.api_key.as_ref().is_none_or(|key| key.is_empty())
    {
        return Err(ConfigError::ValidationError(
            "auth.api_key is required when auth.method is \"api_key\"".to_string(),
        ));
    }

    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Pagination validation
    if config.pagination.default_per_page == 0 {
        return Err(ConfigError::ValidationError(
            "pagination.default_per_page must be at least 1".to_string(),
        ));
    }
    if config.pagination.max_per_page < config.pagination.default_per_page {
        return Err(ConfigError::ValidationError(
            "pagination.max_per_page cannot be below pagination.default_per_page".to_string(),
        ));
    }
    if config.pagination.window == 0 {
        return Err(ConfigError::ValidationError(
            "pagination.window must be at least 1".to_string(),
        ));
    }

    Ok(())
}
