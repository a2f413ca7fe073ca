//! Layered configuration loading.
//!
//! Priority, lowest first: built-in defaults, the JSDoc configuration file,
//! `JSDOC_MD_*` environment variables, command-line overrides.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use serde::Serialize;
use tracing::debug;

use crate::conf::JsdocConf;
use crate::error::{ConfigError, Result};

/// File names probed, in order, when no configuration file is given.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["jsdoc.json", ".jsdoc.json", "conf.json"];

/// Environment prefix. Nested keys use a double underscore, e.g.
/// `JSDOC_MD_OPTS__DESTINATION=docs`.
pub const ENV_PREFIX: &str = "JSDOC_MD_";

/// Values supplied on the command line. Unset fields leave lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub destination: Option<PathBuf>,
    pub includes: Option<String>,
    pub template: Option<PathBuf>,
    pub source_root: Option<PathBuf>,
}

#[derive(Serialize)]
struct OverrideLayer<'a> {
    #[serde(skip_serializing_if = "OptsLayer::is_empty")]
    opts: OptsLayer<'a>,
    #[serde(rename = "sourceRoot", skip_serializing_if = "Option::is_none")]
    source_root: Option<&'a PathBuf>,
}

#[derive(Serialize)]
struct OptsLayer<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    destination: Option<&'a PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    includes: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template: Option<&'a PathBuf>,
}

impl OptsLayer<'_> {
    fn is_empty(&self) -> bool {
        self.destination.is_none() && self.includes.is_none() && self.template.is_none()
    }
}

impl ConfigOverrides {
    fn layer(&self) -> OverrideLayer<'_> {
        OverrideLayer {
            opts: OptsLayer {
                destination: self.destination.as_ref(),
                includes: self.includes.as_ref(),
                template: self.template.as_ref(),
            },
            source_root: self.source_root.as_ref(),
        }
    }
}

/// Finds and loads the configuration of a run.
///
/// # Example
///
/// ```no_run
/// use jsdoc_md_config::{ConfigDiscovery, ConfigOverrides};
///
/// let conf = ConfigDiscovery::new(".")
///     .load(None, &ConfigOverrides::default())
///     .unwrap();
/// println!("{}", conf.destination().display());
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a configuration file in the root directory.
    pub fn find(&self) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| self.root.join(name))
            .find(|path| path.is_file())
    }

    /// Load the configuration.
    ///
    /// `explicit` must exist when given; otherwise the discovered file (if
    /// any) is used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for a missing explicit file and
    /// `ConfigError::InvalidValue` when a layer has the wrong shape.
    pub fn load(&self, explicit: Option<&Path>, overrides: &ConfigOverrides) -> Result<JsdocConf> {
        let file = match explicit {
            Some(path) if !path.is_file() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => self.find(),
        };

        let mut figment = Figment::new().merge(Serialized::defaults(JsdocConf::default()));

        if let Some(path) = &file {
            debug!("loading configuration from {}", path.display());
            figment = figment.merge(Json::file(path));
        }

        figment = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Serialized::defaults(overrides.layer()));

        let conf: JsdocConf = figment.extract()?;
        Ok(conf)
    }
}

/// Load the configuration relative to the current directory (convenience function).
pub fn discover(explicit: Option<&Path>, overrides: &ConfigOverrides) -> Result<JsdocConf> {
    let root = std::env::current_dir()?;
    ConfigDiscovery::new(&root).load(explicit, overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn find_returns_none_when_no_config() {
        let dir = TempDir::new().unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn find_prefers_jsdoc_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("conf.json"), "{}").unwrap();
        fs::write(dir.path().join("jsdoc.json"), "{}").unwrap();

        let found = ConfigDiscovery::new(dir.path()).find().unwrap();
        assert_eq!(found.file_name().unwrap(), "jsdoc.json");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.json");
        let result = ConfigDiscovery::new(dir.path()).load(Some(&missing), &ConfigOverrides::default());
        assert!(matches!(result, Err(ConfigError::NotFound(path)) if path == missing));
    }

    #[test]
    fn overrides_layer_skips_unset_values() {
        let overrides = ConfigOverrides::default();
        let value = serde_json::to_value(overrides.layer()).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }
}
