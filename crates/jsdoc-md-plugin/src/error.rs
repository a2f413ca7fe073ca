use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for doclet processing.
pub type Result<T> = std::result::Result<T, DocletError>;

/// Error variants raised while enriching doclets.
#[derive(Debug, Error)]
pub enum DocletError {
    /// A rule needs the source location but the doclet has none.
    #[error("doclet '{longname}' has no meta.path/meta.filename")]
    MissingLocation {
        /// Longname (or name) of the offending doclet.
        longname: String,
    },

    /// Failed to read a source file referenced by a doclet.
    #[error("failed to read source '{path}': {error}")]
    Io {
        /// Path to the source file that caused the error.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// A syntax-node range points outside its source file.
    #[error("range {start}..{end} is outside of '{path}'")]
    InvalidRange {
        path: PathBuf,
        start: usize,
        end: usize,
    },

    /// Parsing a source file for declaration inspection failed.
    #[error("failed to parse source '{path}': {message}")]
    Parse {
        /// Path to the source file.
        path: PathBuf,
        /// Aggregated parser error message.
        message: String,
    },
}

impl DocletError {
    /// Helper to create a parse error from multiple diagnostic strings.
    pub fn parse_error(path: PathBuf, diagnostics: &[String]) -> Self {
        let message = diagnostics.join("; ");
        Self::Parse { path, message }
    }
}
