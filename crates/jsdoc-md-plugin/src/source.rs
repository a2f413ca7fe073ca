//! Source file access and path arithmetic shared by the rules.

use std::fs;
use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;

use crate::error::{DocletError, Result};
use crate::model::Position;

/// Read a source file referenced by a doclet.
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|error| DocletError::Io {
        path: path.to_path_buf(),
        error,
    })
}

/// Maps parser positions (line/column, UTF-16 offsets) to byte offsets.
#[derive(Debug)]
pub struct LineIndex {
    source: String,
    line_starts: Vec<usize>,
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl LineIndex {
    pub fn new(source: String) -> Self {
        let mut line_starts = Vec::with_capacity(128);
        line_starts.push(0);
        for (idx, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(idx + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Byte offset of a one-based line / zero-based column position.
    pub fn offset(&self, position: Position) -> Option<usize> {
        let line = (position.line as usize).checked_sub(1)?;
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(self.source.len());
        utf16_to_byte(&self.source[start..end], position.column as usize).map(|idx| start + idx)
    }

    /// Byte offset of a character offset counted from the start of the file.
    pub fn offset_of_char(&self, units: u32) -> Option<usize> {
        utf16_to_byte(&self.source, units as usize)
    }
}

fn utf16_to_byte(text: &str, units: usize) -> Option<usize> {
    let mut count = 0usize;
    for (idx, ch) in text.char_indices() {
        if count >= units {
            return Some(idx);
        }
        count += ch.len_utf16();
    }
    (count >= units).then_some(text.len())
}

/// Absolute, lexically normalized form of a path.
pub fn normalize(path: &Path) -> PathBuf {
    std::path::absolute(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .clean()
}

/// Join path components with `/` whatever the platform separator.
pub fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Path of `target` relative to the folder `base`, with `/` separators.
pub fn relative_path(base: &Path, target: &Path) -> String {
    let base = normalize(base);
    let target = normalize(target);
    match pathdiff::diff_paths(&target, &base) {
        Some(relative) => slash_path(&relative),
        None => slash_path(&target),
    }
}

/// Module name of a source file: its path relative to `root`, extension
/// removed. An `index` file is named after its folder, so `a/b/index.js`
/// becomes `a/b` and `a/b/foo.js` becomes `a/b/foo`.
pub fn module_name(file: &Path, root: &Path) -> String {
    let root = normalize(root);
    let file = normalize(file);
    let relative = pathdiff::diff_paths(&file, &root).unwrap_or_else(|| file.clone());

    let stem = relative
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let folder = relative.parent().map(slash_path).unwrap_or_default();

    if stem != "index" {
        return if folder.is_empty() {
            stem
        } else {
            format!("{folder}/{stem}")
        };
    }
    if !folder.is_empty() {
        return folder;
    }
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or(stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_positions_to_byte_offsets() {
        let source = "const a = 1;\nconst é = 'x';\n";
        let index = LineIndex::new(source.to_string());
        assert_eq!(index.source(), source);
        assert_eq!(index.offset(Position { line: 1, column: 6 }), Some(6));
        assert_eq!(index.offset(Position { line: 2, column: 0 }), Some(13));
        // `é` is one UTF-16 unit but two bytes
        assert_eq!(index.offset(Position { line: 2, column: 8 }), Some(13 + 9));
        assert_eq!(index.offset(Position { line: 9, column: 0 }), None);
        assert_eq!(index.offset_of_char(13), Some(13));
        assert_eq!(LineIndex::default().offset(Position { line: 1, column: 0 }), Some(0));
    }

    #[test]
    fn module_names_collapse_index_files() {
        let root = Path::new("/project");
        assert_eq!(module_name(Path::new("/project/a/b/index.js"), root), "a/b");
        assert_eq!(module_name(Path::new("/project/a/b/foo.js"), root), "a/b/foo");
        assert_eq!(module_name(Path::new("/project/foo.ts"), root), "foo");
        assert_eq!(module_name(Path::new("/project/index.js"), root), "project");
    }

    #[test]
    fn relative_paths_use_forward_slashes() {
        assert_eq!(
            relative_path(Path::new("/project/docs"), Path::new("/project/src/a.js")),
            "../src/a.js"
        );
        assert_eq!(relative_path(Path::new("/project"), Path::new("/project/./src/b.js")), "src/b.js");
    }
}
