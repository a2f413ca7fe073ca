//! Semantic checks run after loading.

use tracing::warn;

use crate::conf::{ACCESS_LEVELS, JsdocConf};
use crate::error::{ConfigError, Result};

impl JsdocConf {
    /// Validate values the type system cannot express.
    ///
    /// An unknown access level would silently exclude every non-module,
    /// non-class doclet, so it is rejected.
    pub fn validate(&self) -> Result<()> {
        if self.opts.destination.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDestination);
        }

        for level in self.includes() {
            if !ACCESS_LEVELS.contains(&level.as_str()) {
                return Err(ConfigError::UnknownAccess(level));
            }
        }

        let markdown = self.markdown();
        for category in markdown.toc_order.keys() {
            if !markdown.badgecolors.contains_key(category) {
                warn!("category '{category}' has a toc position but no badge color");
            }
        }

        Ok(())
    }
}
