//! Table of contents: modules grouped by category.

use indexmap::IndexMap;
use jsdoc_md_plugin::Doclet;
use serde::Serialize;

/// Color of a category without a configured badge color.
pub const DEFAULT_BADGE_COLOR: &str = "blue";

/// One TOC section, as handed to the `toc` template.
#[derive(Debug, Clone, Serialize)]
pub struct TocCategory<'a> {
    pub name: String,
    pub entries: Vec<&'a Doclet>,
    pub color: String,
}

/// Group modules by category in first-seen order, then order the groups by
/// `toc_order`. Categories missing from `toc_order` come after the listed
/// ones, keeping their first-seen order.
pub fn build_toc<'a>(
    modules: &'a [Doclet],
    toc_order: &IndexMap<String, i64>,
    badgecolors: &IndexMap<String, String>,
) -> Vec<TocCategory<'a>> {
    let mut groups: IndexMap<&str, Vec<&Doclet>> = IndexMap::new();
    for module in modules {
        let category = module.category.as_deref().unwrap_or("other");
        groups.entry(category).or_default().push(module);
    }

    let mut toc: Vec<TocCategory<'a>> = groups
        .into_iter()
        .map(|(name, entries)| TocCategory {
            name: name.to_string(),
            entries,
            color: badgecolors
                .get(name)
                .cloned()
                .unwrap_or_else(|| DEFAULT_BADGE_COLOR.to_string()),
        })
        .collect();
    toc.sort_by_key(|category| match toc_order.get(&category.name) {
        Some(&rank) => (false, rank),
        None => (true, 0),
    });
    toc
}
