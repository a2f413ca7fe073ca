//! The plugin instance owning one run's state.

use std::path::PathBuf;

use indexmap::IndexMap;
use jsdoc_md_config::{DEFAULT_INCLUDES, JsdocConf, parse_includes};

use crate::error::Result;
use crate::hierarchy::reconstruct;
use crate::host::DocletHandlers;
use crate::inspect::{DeclarationInspector, NodeInspector};
use crate::model::Doclet;
use crate::rules::{ExportedClasses, RuleContext, RuleTable};

/// Settings read before any doclet is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginOptions {
    /// Output folder; screenshots and relative paths are resolved against it.
    pub doc_folder: PathBuf,
    /// Access levels that make a doclet `included`.
    pub includes: Vec<String>,
    pub badge_colors: IndexMap<String, String>,
    /// Module names are derived relative to this folder.
    pub source_root: PathBuf,
}

impl PluginOptions {
    pub fn from_conf(conf: &JsdocConf) -> Self {
        Self {
            doc_folder: conf.destination().to_path_buf(),
            includes: conf.includes(),
            badge_colors: conf.markdown().badgecolors.clone(),
            source_root: conf.source_root(),
        }
    }
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            doc_folder: jsdoc_md_config::default_destination(),
            includes: parse_includes(DEFAULT_INCLUDES),
            badge_colors: IndexMap::new(),
            source_root: PathBuf::from("."),
        }
    }
}

/// Rule table, options, inspector and exported-class list for one run.
///
/// Create one per run; the exported-class list is never reset.
#[derive(Debug)]
pub struct DocletPlugin<I = NodeInspector> {
    options: PluginOptions,
    rules: RuleTable,
    exported: ExportedClasses,
    inspector: I,
}

impl DocletPlugin<NodeInspector> {
    pub fn new(options: PluginOptions) -> Self {
        Self::with_inspector(options, NodeInspector)
    }
}

impl<I: DeclarationInspector> DocletPlugin<I> {
    pub fn with_inspector(options: PluginOptions, inspector: I) -> Self {
        Self {
            options,
            rules: RuleTable::standard(),
            exported: ExportedClasses::new(),
            inspector,
        }
    }

    pub fn options(&self) -> &PluginOptions {
        &self.options
    }

    pub fn exported_classes(&self) -> &ExportedClasses {
        &self.exported
    }

    /// Apply the rule table to one doclet.
    pub fn process<'d>(&mut self, doclet: &'d mut Doclet) -> Result<&'d mut Doclet> {
        let mut ctx = RuleContext::new(&self.options, &mut self.exported, &self.inspector);
        self.rules.apply(doclet, &mut ctx)
    }

    /// Reconstruct the module hierarchy over the whole collection.
    pub fn complete(&mut self, doclets: &mut Vec<Doclet>) -> Result<()> {
        let mut ctx = RuleContext::new(&self.options, &mut self.exported, &self.inspector);
        reconstruct(doclets, &self.rules, &mut ctx)
    }
}

impl<I: DeclarationInspector> DocletHandlers for DocletPlugin<I> {
    fn new_doclet(&mut self, doclet: &mut Doclet) -> Result<()> {
        self.process(doclet).map(|_| ())
    }

    fn parse_complete(&mut self, doclets: &mut Vec<Doclet>) -> Result<()> {
        self.complete(doclets)
    }
}
