//! Configuration for jsdoc-md runs.
//!
//! The model follows the JSDoc `conf.json` layout (`opts` plus
//! `templates.markdown`) so an existing JSDoc configuration file can be
//! reused as is.

pub mod conf;
pub mod discovery;
pub mod error;
pub mod validation;

pub use conf::*;
pub use discovery::{CONFIG_FILE_NAMES, ConfigDiscovery, ConfigOverrides, ENV_PREFIX, discover};
pub use error::*;
