//! Markdown publication: tree, links, module files, table of contents,
//! resources.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use jsdoc_md_config::JsdocConf;
use jsdoc_md_plugin::Doclet;
use minijinja::context;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::error::{RenderError, Result};
use crate::helpers;
use crate::links::TypesIndex;
use crate::naming::doc_file_name;
use crate::resources::copy_resources;
use crate::templates::Templates;
use crate::toc::build_toc;
use crate::tree::{build_tree, sort_module_children};

/// Everything the generator reads from the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateOptions {
    pub destination: PathBuf,
    /// Folder holding `templates/` and `resources/`; embedded templates when
    /// unset.
    pub template_dir: Option<PathBuf>,
    pub source_root: PathBuf,
    pub tocfilename: String,
    pub toc_order: IndexMap<String, i64>,
    pub externallinks: IndexMap<String, String>,
    pub badgecolors: IndexMap<String, String>,
    pub imageext: String,
}

impl TemplateOptions {
    pub fn from_conf(conf: &JsdocConf) -> Self {
        let markdown = conf.markdown();
        Self {
            destination: conf.destination().to_path_buf(),
            template_dir: conf.opts.template.clone(),
            source_root: conf.source_root(),
            tocfilename: markdown.tocfilename.clone(),
            toc_order: markdown.toc_order.clone(),
            externallinks: markdown.externallinks.clone(),
            badgecolors: markdown.badgecolors.clone(),
            imageext: markdown.imageext.clone(),
        }
    }
}

/// Outcome of a publication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Files written, module documents first and the TOC last.
    pub written: Vec<PathBuf>,
    /// Documents skipped because rendering or writing failed.
    pub failed: usize,
    /// Resource files copied.
    pub resources: usize,
}

/// Build the documentation tree from enriched doclets and write one markdown
/// file per module plus the table of contents.
///
/// The `module` template renders a module doclet; the `toc` template gets the
/// category list as `categories`.
///
/// Only an uncreatable destination folder fails the whole run;
/// per-document failures are logged and counted in the report.
pub fn publish(doclets: &[Doclet], options: &TemplateOptions) -> Result<PublishReport> {
    let mut root = build_tree(doclets);
    let index = Arc::new(TypesIndex::build(
        &root,
        &options.source_root,
        &options.externallinks,
    ));
    debug!(types = index.len(), "built types index");

    let mut templates = Templates::load(options.template_dir.as_deref());
    helpers::register(
        templates.environment_mut(),
        Arc::clone(&index),
        options.imageext.clone(),
    );

    fs::create_dir_all(&options.destination)
        .map_err(|e| RenderError::io(&options.destination, e))?;

    let mut report = PublishReport::default();
    for module in &mut root.modules {
        index.rewrite_doclet(module);
        sort_module_children(module);
        let Some(file_name) = doc_file_name(module, &options.source_root) else {
            error!(module = module.label(), "module has no source location, skipped");
            report.failed += 1;
            continue;
        };
        write_document(&templates, "module", &*module, &file_name, options, &mut report);
    }

    if !root.modules.is_empty() {
        let toc = build_toc(&root.modules, &options.toc_order, &options.badgecolors);
        let context = context! { categories => toc };
        write_document(&templates, "toc", context, &options.tocfilename, options, &mut report);
    }

    if let Some(dir) = &options.template_dir {
        match copy_resources(&dir.join("resources"), &options.destination) {
            Ok(count) => report.resources = count,
            Err(err) => error!(
                "Unable to copy resources in documentation folder {}: {err}",
                options.destination.display()
            ),
        }
    }

    info!(
        written = report.written.len(),
        failed = report.failed,
        resources = report.resources,
        "documentation generated"
    );
    Ok(report)
}

fn write_document<S: Serialize>(
    templates: &Templates,
    template: &str,
    context: S,
    file_name: &str,
    options: &TemplateOptions,
    report: &mut PublishReport,
) {
    let path = options.destination.join(file_name);
    match render_to(templates, template, context, &path) {
        Ok(()) => {
            debug!(file = %path.display(), "wrote document");
            report.written.push(path);
        }
        Err(err) => {
            error!("Unable to generate {file_name}: {err}");
            report.failed += 1;
        }
    }
}

fn render_to<S: Serialize>(templates: &Templates, template: &str, context: S, path: &Path) -> Result<()> {
    let content = templates.render(template, context)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| RenderError::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| RenderError::io(path, e))
}
