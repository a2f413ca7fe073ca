//! Error types for configuration loading and validation.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid config value for '{field}'{}", hint.as_ref().map(|h| format!(": {h}")).unwrap_or_default())]
    InvalidValue { field: String, hint: Option<String> },

    #[error("unknown access level '{0}' in includes (expected public, protected, private or package)")]
    UnknownAccess(String),

    #[error("destination folder must not be empty")]
    EmptyDestination,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        let field = error
            .path
            .last()
            .cloned()
            .unwrap_or_else(|| "configuration".to_string());
        Self::InvalidValue {
            field,
            hint: Some(error.kind.to_string()),
        }
    }
}
