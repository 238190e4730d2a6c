use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Load configuration from a TOML file, then let `MARQUEE_*` environment
/// variables override individual keys (`MARQUEE_SERVER_PORT=9000`).
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    Figment::from(Toml::file(path))
        .merge(Env::prefixed("MARQUEE_").split("_"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Parse configuration straight from a TOML string. No environment
/// overrides are applied; tests use this to stay hermetic.
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
