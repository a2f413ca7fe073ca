//! Command implementations.
//!
//! - [`enrich`] - run the doclet plugin over a doclet dump
//! - [`generate`] - enrich, then render markdown
//! - [`check`] - configuration validation
//!
//! Each command provides an `execute` function taking the shared
//! configuration flags and its own parsed arguments.

pub mod check;
pub mod enrich;
pub mod generate;

use std::fs;
use std::io::{self, Read};

use jsdoc_md_config::{ConfigOverrides, JsdocConf, discover};
use jsdoc_md_plugin::{
    Doclet, DocletPlugin, OxcInspector, PluginOptions, TagDictionary, define_tags, run,
};
use tracing::debug;

use crate::cli::{ConfigArgs, InspectorKind};
use crate::error::{Result, ResultExt};

pub use check::execute as check_execute;
pub use enrich::execute as enrich_execute;
pub use generate::execute as generate_execute;

/// Marker for reading doclets from stdin.
pub const STDIN: &str = "-";

/// Discover, load and validate the configuration.
pub(crate) fn load_conf(config: &ConfigArgs, overrides: &ConfigOverrides) -> Result<JsdocConf> {
    let conf = discover(config.config.as_deref(), overrides)?;
    conf.validate()?;
    Ok(conf)
}

/// Read a JSON array of doclets from a file, or from stdin for `-`.
pub(crate) fn read_doclets(source: &str) -> Result<Vec<Doclet>> {
    let text = if source == STDIN {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(source).with_path(source)?
    };
    let doclets: Vec<Doclet> = serde_json::from_str(&text)?;
    debug!(count = doclets.len(), source, "read doclets");
    Ok(doclets)
}

/// Run the plugin over the doclets the way a JSDoc run would.
pub(crate) fn enrich_doclets(
    conf: &JsdocConf,
    inspector: InspectorKind,
    doclets: Vec<Doclet>,
) -> Result<Vec<Doclet>> {
    let options = PluginOptions::from_conf(conf);
    let mut dictionary = TagDictionary::new();
    define_tags(&mut dictionary);

    let enriched = match inspector {
        InspectorKind::Node => run(&mut DocletPlugin::new(options), &dictionary, doclets)?,
        InspectorKind::Oxc => run(
            &mut DocletPlugin::with_inspector(options, OxcInspector::new()),
            &dictionary,
            doclets,
        )?,
    };
    Ok(enriched)
}
