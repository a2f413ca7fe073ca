//! jsdoc-md CLI - markdown documentation from JSDoc doclets.
//!
//! - [`cli`] - argument definitions
//! - [`commands`] - `enrich`, `generate` and `check`
//! - [`error`] - CLI errors and their miette rendering
//! - [`logger`] - tracing setup

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
