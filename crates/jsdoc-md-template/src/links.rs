//! Types index and `{@link}` rewriting.

use std::path::Path;
use std::sync::LazyLock;

use indexmap::IndexMap;
use jsdoc_md_plugin::{Doclet, Param};
use regex::{Captures, Regex};

use crate::naming::doc_file_name;

static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\{@link\s+([^|\s}]+)(?:\|([^}]+))?\}").expect("link pattern is valid")
});

/// Type name → link target (a generated doc file or an external URL).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypesIndex {
    entries: IndexMap<String, String>,
}

impl TypesIndex {
    /// Index the classes of every root module, then the root modules, then
    /// the configured external links. Later entries win.
    pub fn build(root: &Doclet, base: &Path, externallinks: &IndexMap<String, String>) -> Self {
        let mut entries = IndexMap::new();
        let classes = root.modules.iter().flat_map(|module| module.classes.iter());
        for doclet in classes.chain(root.modules.iter()) {
            let Some(name) = doclet.name.as_deref().filter(|name| !name.is_empty()) else {
                continue;
            };
            if let Some(file) = doc_file_name(doclet, base) {
                entries.insert(name.to_string(), file);
            }
        }
        for (name, target) in externallinks {
            entries.insert(name.clone(), target.clone());
        }
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace `{@link target}` and `{@link target|label}` with markdown links.
    pub fn rewrite(&self, text: &str) -> String {
        LINK.replace_all(text, |caps: &Captures<'_>| {
            let target = &caps[1];
            let label = caps.get(2).map_or(target, |label| label.as_str());
            let href = self.get(target).unwrap_or(target);
            format!("[{label}]({href})")
        })
        .into_owned()
    }

    fn rewrite_field(&self, field: &mut Option<String>) {
        if let Some(text) = field.as_mut() {
            *text = self.rewrite(text);
        }
    }

    fn rewrite_params(&self, params: &mut [Param]) {
        for param in params {
            self.rewrite_field(&mut param.description);
        }
    }

    /// Rewrite descriptions of a doclet and, recursively, of its classes,
    /// functions and constants, including parameter and return descriptions.
    pub fn rewrite_doclet(&self, doclet: &mut Doclet) {
        self.rewrite_field(&mut doclet.classdesc);
        self.rewrite_field(&mut doclet.description);
        self.rewrite_field(&mut doclet.toc_description);
        self.rewrite_params(&mut doclet.params);
        self.rewrite_params(&mut doclet.returns);
        for child in doclet
            .classes
            .iter_mut()
            .chain(doclet.functions.iter_mut())
            .chain(doclet.constants.iter_mut())
        {
            self.rewrite_doclet(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsdoc_md_plugin::DocletKind;

    fn index() -> TypesIndex {
        let mut root = Doclet::default();
        let mut module = Doclet::new(DocletKind::Module, "widget").at("/project/src", "widget.js");
        module
            .classes
            .push(Doclet::new(DocletKind::Class, "Widget").at("/project/src", "widget.js"));
        root.modules.push(module);
        let external = IndexMap::from([("Promise".to_string(), "https://mdn.io/Promise".to_string())]);
        TypesIndex::build(&root, Path::new("/project"), &external)
    }

    #[test]
    fn indexes_modules_classes_and_external_links() {
        let index = index();
        assert_eq!(index.get("widget"), Some("src_widget.md"));
        assert_eq!(index.get("Widget"), Some("src_widget.md"));
        assert_eq!(index.get("Promise"), Some("https://mdn.io/Promise"));
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn rewrites_known_and_unknown_targets() {
        let index = index();
        assert_eq!(
            index.rewrite("See {@link Widget} and {@link https://x.org|the site}."),
            "See [Widget](src_widget.md) and [the site](https://x.org)."
        );
        assert_eq!(index.rewrite("{@link Unknown}"), "[Unknown](Unknown)");
        assert_eq!(index.rewrite("no links"), "no links");
    }

    #[test]
    fn rewrites_nested_descriptions() {
        let index = index();
        let mut module = Doclet::new(DocletKind::Module, "m");
        let mut function = Doclet::new(DocletKind::Function, "make");
        function.params.push(Param {
            description: Some("a {@link Widget}".to_string()),
            ..Param::default()
        });
        module.functions.push(function);
        module.toc_description = Some("Uses {@link Promise}".to_string());

        index.rewrite_doclet(&mut module);
        assert_eq!(module.toc_description.as_deref(), Some("Uses [Promise](https://mdn.io/Promise)"));
        assert_eq!(
            module.functions[0].params[0].description.as_deref(),
            Some("a [Widget](src_widget.md)")
        );
    }
}
