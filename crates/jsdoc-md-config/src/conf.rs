//! Configuration model mirroring the JSDoc `conf.json` layout.
//!
//! Only the keys the plugin and the markdown template read are modelled; any
//! other key in a JSDoc configuration file (`source`, `plugins`, `tags`, ...)
//! is ignored when deserializing.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Access levels accepted when no `includes` option is configured.
pub const DEFAULT_INCLUDES: &str = "public,protected,private";

/// Access levels a doclet can carry.
pub const ACCESS_LEVELS: [&str; 4] = ["public", "protected", "private", "package"];

pub fn default_destination() -> PathBuf {
    PathBuf::from("./out/")
}

pub fn default_encoding() -> String {
    "utf8".to_string()
}

pub fn default_tocfilename() -> String {
    "toc.md".to_string()
}

pub fn default_imageext() -> String {
    "svg".to_string()
}

/// Top-level configuration of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsdocConf {
    #[serde(default)]
    pub opts: Opts,

    #[serde(default)]
    pub templates: Templates,

    /// Root used to derive module names and documentation file names.
    /// Defaults to the working directory of the run.
    #[serde(default, rename = "sourceRoot", skip_serializing_if = "Option::is_none")]
    pub source_root: Option<PathBuf>,
}

/// Command-line style options (`opts` in a JSDoc configuration file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opts {
    /// Output folder of the generated documentation.
    #[serde(default = "default_destination")]
    pub destination: PathBuf,

    /// Comma-separated list of access levels kept in the documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub includes: Option<String>,

    /// Folder holding `templates/` and `resources/`. The embedded templates
    /// are used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,

    #[serde(default = "default_encoding")]
    pub encoding: String,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            destination: default_destination(),
            includes: None,
            template: None,
            encoding: default_encoding(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Templates {
    #[serde(default)]
    pub markdown: MarkdownOptions,
}

/// Options of the markdown template (`templates.markdown`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkdownOptions {
    /// Badge color per category.
    #[serde(default)]
    pub badgecolors: IndexMap<String, String>,

    #[serde(default = "default_tocfilename")]
    pub tocfilename: String,

    /// Position of each category in the table of contents.
    #[serde(default, rename = "tocOrder")]
    pub toc_order: IndexMap<String, i64>,

    /// Extra link targets keyed by type name.
    #[serde(default)]
    pub externallinks: IndexMap<String, String>,

    #[serde(default = "default_imageext")]
    pub imageext: String,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            badgecolors: IndexMap::new(),
            tocfilename: default_tocfilename(),
            toc_order: IndexMap::new(),
            externallinks: IndexMap::new(),
            imageext: default_imageext(),
        }
    }
}

impl JsdocConf {
    /// The configured access filter: lower-cased, whitespace removed, split on
    /// commas. Empty entries are dropped.
    pub fn includes(&self) -> Vec<String> {
        parse_includes(self.opts.includes.as_deref().unwrap_or(DEFAULT_INCLUDES))
    }

    pub fn destination(&self) -> &Path {
        &self.opts.destination
    }

    pub fn markdown(&self) -> &MarkdownOptions {
        &self.templates.markdown
    }

    /// Source root, falling back to the current working directory.
    pub fn source_root(&self) -> PathBuf {
        self.source_root
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

pub fn parse_includes(raw: &str) -> Vec<String> {
    raw.to_lowercase()
        .split(',')
        .map(|level| level.chars().filter(|c| !c.is_whitespace()).collect::<String>())
        .filter(|level| !level.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_default_to_every_access_level() {
        let conf = JsdocConf::default();
        assert_eq!(conf.includes(), vec!["public", "protected", "private"]);
    }

    #[test]
    fn includes_are_normalized() {
        assert_eq!(parse_includes(" Public, PROTECTED ,,"), vec!["public", "protected"]);
    }

    #[test]
    fn deserializes_jsdoc_layout() {
        let conf: JsdocConf = serde_json::from_str(
            r#"{
                "source": { "include": ["src"] },
                "opts": { "destination": "docs", "includes": "public" },
                "templates": {
                    "markdown": {
                        "badgecolors": { "cat1": "FFFFFF" },
                        "tocOrder": { "core": 1 }
                    }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(conf.destination(), Path::new("docs"));
        assert_eq!(conf.includes(), vec!["public"]);
        assert_eq!(conf.markdown().badgecolors["cat1"], "FFFFFF");
        assert_eq!(conf.markdown().toc_order["core"], 1);
        assert_eq!(conf.markdown().tocfilename, "toc.md");
        assert_eq!(conf.markdown().imageext, "svg");
        assert_eq!(conf.opts.encoding, "utf8");
    }
}
