use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{RenderError, Result};

/// Copy `source` recursively into `destination`, overwriting existing files.
/// Returns the number of files copied.
pub fn copy_resources(source: &Path, destination: &Path) -> Result<usize> {
    let fail = |message: String| RenderError::Resources {
        destination: destination.to_path_buf(),
        message,
    };

    let mut copied = 0;
    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| fail(e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| fail(e.to_string()))?;
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| RenderError::io(&target, e))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| RenderError::io(parent, e))?;
            }
            fs::copy(entry.path(), &target).map_err(|e| RenderError::io(&target, e))?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn copies_nested_files() {
        let source = TempDir::new().unwrap();
        let destination = TempDir::new().unwrap();
        fs::create_dir_all(source.path().join("images/badges")).unwrap();
        fs::write(source.path().join("style.css"), "body {}").unwrap();
        fs::write(source.path().join("images/badges/blue.svg"), "<svg/>").unwrap();

        let copied = copy_resources(source.path(), destination.path()).unwrap();
        assert_eq!(copied, 2);
        assert_eq!(
            fs::read_to_string(destination.path().join("images/badges/blue.svg")).unwrap(),
            "<svg/>"
        );
    }

    #[test]
    fn missing_source_is_an_error() {
        let destination = TempDir::new().unwrap();
        let err = copy_resources(&destination.path().join("nope"), destination.path()).unwrap_err();
        assert!(matches!(err, RenderError::Resources { .. }));
    }
}
