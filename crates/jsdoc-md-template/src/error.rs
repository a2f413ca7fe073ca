use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for rendering.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Error variants raised while publishing documentation.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Reading a template or writing an output file failed.
    #[error("I/O error on '{path}': {error}")]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// No template registered under this name.
    #[error("there is no template for {0}")]
    MissingTemplate(String),

    /// A template failed to compile or render.
    #[error("template '{name}' failed: {error}")]
    Template {
        name: String,
        #[source]
        error: minijinja::Error,
    },

    /// Copying the template resources failed.
    #[error("unable to copy resources into '{destination}': {message}")]
    Resources {
        destination: PathBuf,
        message: String,
    },
}

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            error,
        }
    }

    pub(crate) fn template(name: impl Into<String>, error: minijinja::Error) -> Self {
        Self::Template {
            name: name.into(),
            error,
        }
    }
}
