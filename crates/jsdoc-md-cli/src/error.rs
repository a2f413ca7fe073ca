//! Error handling for the CLI.
//!
//! Library errors convert into `CliError` through `#[from]`; `main` turns the
//! final error into a miette report.

mod diagnostic;

use std::path::PathBuf;

use jsdoc_md_config::ConfigError;
use jsdoc_md_plugin::DocletError;
use jsdoc_md_template::RenderError;
use thiserror::Error;

pub use diagnostic::cli_error_to_miette;

#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file missing, malformed or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The plugin rejected a doclet.
    #[error("Doclet error: {0}")]
    Doclet(#[from] DocletError),

    /// Documentation could not be written.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Doclets file not found.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The doclets input is not a JSON array of doclets.
    #[error("Invalid doclets JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Context helpers for fallible CLI steps.
pub trait ResultExt<T> {
    /// Report a missing file as `FileNotFound(path)`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Append a hint to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{err}\n\nHint: {hint}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn missing_file_gets_its_path() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = result.with_path("doclets.json").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(ref p) if p.ends_with("doclets.json")));
    }

    #[test]
    fn other_io_errors_are_kept() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(matches!(result.with_path("x").unwrap_err(), CliError::Io(_)));
    }

    #[test]
    fn hint_is_appended() {
        let result: Result<()> = Err(CliError::Custom("bad input".into()));
        let err = result.with_hint("run `jsdoc -X` first").unwrap_err();
        assert_eq!(err.to_string(), "bad input\n\nHint: run `jsdoc -X` first");
    }
}
