//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::NavigationConfig;
use crate::config::validation::{join_errors, validate_config, ValidationError};

/// Route table of the admin application, used when no file is given.
pub const ADMIN_ROUTES_TOML: &str = include_str!("../../config/admin.toml");

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<NavigationConfig, ConfigError> {
    let config: NavigationConfig = toml::from_str(content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<NavigationConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    tracing::info!(
        path = %path.display(),
        routes = config.routes.len(),
        "Navigation config loaded"
    );
    Ok(config)
}

impl NavigationConfig {
    /// The built-in admin route table.
    pub fn admin() -> Result<Self, ConfigError> {
        parse_config(ADMIN_ROUTES_TOML)
    }
}
