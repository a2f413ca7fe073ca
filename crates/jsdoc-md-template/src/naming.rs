use std::path::{Component, Path};

use jsdoc_md_plugin::Doclet;
use jsdoc_md_plugin::source::normalize;

/// Documentation file name of a module or class:
/// `<folder relative to base, separators as '-'>_<file stem>.md`.
///
/// `None` when the doclet has no source location.
pub fn doc_file_name(doclet: &Doclet, base: &Path) -> Option<String> {
    let meta = doclet.meta.as_ref()?;
    let folder = normalize(Path::new(meta.path.as_deref()?));
    let stem = Path::new(meta.filename.as_deref()?).file_stem()?.to_string_lossy();

    let relative = pathdiff::diff_paths(&folder, normalize(base)).unwrap_or(folder);
    let unique = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("-");

    Some(format!("{unique}_{stem}.md"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsdoc_md_plugin::DocletKind;

    #[test]
    fn joins_folders_with_dashes() {
        let doclet = Doclet::new(DocletKind::Module, "widget").at("/project/src/ui", "widget.js");
        assert_eq!(
            doc_file_name(&doclet, Path::new("/project")).as_deref(),
            Some("src-ui_widget.md")
        );
    }

    #[test]
    fn file_at_base_has_empty_prefix() {
        let doclet = Doclet::new(DocletKind::Module, "main").at("/project", "main.ts");
        assert_eq!(doc_file_name(&doclet, Path::new("/project")).as_deref(), Some("_main.md"));
    }

    #[test]
    fn relative_base_resolves_against_working_directory() {
        let cwd = std::env::current_dir().unwrap();
        let folder = cwd.join("src").join("ui");
        let doclet = Doclet::new(DocletKind::Module, "widget").at(folder.to_string_lossy(), "widget.js");
        assert_eq!(doc_file_name(&doclet, Path::new("src")).as_deref(), Some("ui_widget.md"));
        assert_eq!(doc_file_name(&doclet, &cwd.join("src")).as_deref(), Some("ui_widget.md"));
        assert_eq!(doc_file_name(&doclet, Path::new("./src/")).as_deref(), Some("ui_widget.md"));
    }

    #[test]
    fn missing_location_has_no_name() {
        let doclet = Doclet::new(DocletKind::Module, "ghost");
        assert_eq!(doc_file_name(&doclet, Path::new("/project")), None);
    }
}
