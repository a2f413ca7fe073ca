//! Module hierarchy reconstruction.
//!
//! Source files with documented declarations but no `@module` doclet would
//! leave their global classes and functions without a parent. After parsing,
//! every such file gets one synthesized module doclet and its global classes
//! and functions are re-parented under it.

use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::Result;
use crate::model::{Doclet, DocletKind, Meta};
use crate::rules::{RuleContext, RuleTable};
use crate::source::module_name;

/// Description and category a synthesized module borrows from its class.
#[derive(Debug, Default, Clone)]
struct Borrowed {
    classdesc: Option<String>,
    category: Option<String>,
}

/// Re-parent global classes/functions and append one module doclet per
/// source file that lacks an explicit one.
pub fn reconstruct(doclets: &mut Vec<Doclet>, rules: &RuleTable, ctx: &mut RuleContext<'_>) -> Result<()> {
    let documented_files: IndexSet<PathBuf> = doclets
        .iter()
        .filter(|doclet| !doclet.undocumented)
        .filter_map(Doclet::file_path)
        .collect();

    let mut module_files: FxHashMap<PathBuf, String> = FxHashMap::default();
    for doclet in doclets
        .iter()
        .filter(|doclet| doclet.is(DocletKind::Module) && !doclet.undocumented)
    {
        if let Some(file) = doclet.file_path() {
            let longname = doclet
                .longname
                .clone()
                .unwrap_or_else(|| format!("module:{}", doclet.name.as_deref().unwrap_or_default()));
            module_files.entry(file).or_insert(longname);
        }
    }

    let targets: Vec<&PathBuf> = documented_files
        .iter()
        .filter(|file| !module_files.contains_key(*file))
        .collect();

    let source_root = ctx.options.source_root.clone();
    let mut borrowed: FxHashMap<PathBuf, Borrowed> = FxHashMap::default();

    for kind in [DocletKind::Class, DocletKind::Function] {
        for doclet in doclets.iter_mut().filter(|doclet| is_global(doclet, kind)) {
            let file = doclet.require_file_path()?;
            let parent = module_files
                .get(&file)
                .cloned()
                .unwrap_or_else(|| format!("module:{}", module_name(&file, &source_root)));
            debug!(doclet = doclet.label(), parent = %parent, "re-parenting global declaration");
            doclet.memberof = Some(parent);

            if kind == DocletKind::Class {
                borrowed.insert(
                    file,
                    Borrowed {
                        classdesc: doclet.classdesc.clone(),
                        category: doclet.category.clone(),
                    },
                );
            }
        }
    }

    let mut modules = Vec::with_capacity(targets.len());
    for file in targets {
        let name = module_name(file, &source_root);
        let from_class = borrowed.get(file.as_path()).cloned().unwrap_or_default();
        let mut module = synthesize_module(file, &name, from_class);
        rules.apply(&mut module, ctx)?;
        debug!(module = module.label(), file = %file.display(), "synthesized module");
        modules.push(module);
    }

    doclets.extend(modules);
    Ok(())
}

fn is_global(doclet: &Doclet, kind: DocletKind) -> bool {
    doclet.is(kind) && !doclet.undocumented && doclet.scope.as_deref() == Some("global")
}

fn synthesize_module(file: &Path, name: &str, from_class: Borrowed) -> Doclet {
    let meta = Meta {
        path: file.parent().map(|dir| dir.to_string_lossy().into_owned()),
        filename: file.file_name().map(|base| base.to_string_lossy().into_owned()),
        ..Meta::default()
    };
    Doclet {
        kind: Some(DocletKind::Module),
        name: Some(name.to_string()),
        longname: Some(format!("module:{name}")),
        toc_description: Some(from_class.classdesc.unwrap_or_else(|| format!("Module {name}"))),
        category: from_class.category,
        meta: Some(meta),
        ..Doclet::default()
    }
}
