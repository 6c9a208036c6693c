//! Recursive template directory walking.
//!
//! Discovery is separated from compilation so the walk can be tested on its
//! own and so a compilation pass always operates on a complete, ordered file
//! list.

use std::path::{Path, PathBuf};

use crate::error::CompileError;

/// A template file discovered during directory walking.
///
/// For a file at `templates/todos/list.tmpl` with root `templates` and
/// extension `.tmpl`, the logical `name` is `"todos/list"` — the relative
/// path with the extension stripped and separators normalized to forward
/// slashes regardless of host convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Logical name used to address the template.
    pub name: String,
    /// Filesystem path for reading the file's content.
    pub path: PathBuf,
}

/// Walks `root` recursively and collects files whose name ends in
/// `extension`.
///
/// Entries are visited in lexicographic file-name order at every level, so
/// the returned list is a stable contract across platforms and runs.
/// Non-matching files and empty directories are skipped silently.
///
/// # Errors
///
/// Returns [`CompileError::Walk`] if any directory in the tree cannot be
/// read. Traversal aborts on the first failure; no partial listing escapes.
pub fn walk_template_dir(root: &Path, extension: &str) -> Result<Vec<TemplateFile>, CompileError> {
    let mut files = Vec::new();
    walk_recursive(root, root, extension, &mut files)?;
    Ok(files)
}

fn walk_recursive(
    current: &Path,
    root: &Path,
    extension: &str,
    files: &mut Vec<TemplateFile>,
) -> Result<(), CompileError> {
    let read_dir = std::fs::read_dir(current).map_err(|e| CompileError::Walk {
        path: current.to_path_buf(),
        source: e,
    })?;

    let mut entries = read_dir
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CompileError::Walk {
            path: current.to_path_buf(),
            source: e,
        })?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            walk_recursive(&path, root, extension, files)?;
        } else if path.is_file() {
            if let Some(file) = try_parse_file(&path, root, extension) {
                files.push(file);
            }
        }
    }

    Ok(())
}

/// Derives the logical name for `path`, or `None` if the extension doesn't
/// match.
fn try_parse_file(path: &Path, root: &Path, extension: &str) -> Option<TemplateFile> {
    let relative = path.strip_prefix(root).ok()?;
    let relative = relative
        .to_string_lossy()
        .replace(std::path::MAIN_SEPARATOR, "/");
    let name = relative.strip_suffix(extension)?.to_string();

    Some(TemplateFile {
        name,
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_file(dir: &Path, relative_path: &str, content: &str) {
        let full_path = dir.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        let mut file = std::fs::File::create(&full_path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_walk_collects_matching_files() {
        let dir = TempDir::new().unwrap();
        create_file(dir.path(), "index.tmpl", "index");
        create_file(dir.path(), "about.tmpl", "about");
        create_file(dir.path(), "notes.txt", "ignored");

        let files = walk_template_dir(dir.path(), ".tmpl").unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["about", "index"]);
    }

    #[test]
    fn test_walk_nested_names_use_forward_slashes() {
        let dir = TempDir::new().unwrap();
        create_file(dir.path(), "todos/list.tmpl", "list");
        create_file(dir.path(), "todos/detail.tmpl", "detail");

        let files = walk_template_dir(dir.path(), ".tmpl").unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["todos/detail", "todos/list"]);
    }

    #[test]
    fn test_walk_order_is_lexicographic() {
        let dir = TempDir::new().unwrap();
        create_file(dir.path(), "c.tmpl", "");
        create_file(dir.path(), "a.tmpl", "");
        create_file(dir.path(), "b/inner.tmpl", "");

        let files = walk_template_dir(dir.path(), ".tmpl").unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b/inner", "c"]);
    }

    #[test]
    fn test_walk_empty_directory() {
        let dir = TempDir::new().unwrap();
        let files = walk_template_dir(dir.path(), ".tmpl").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_walk_missing_directory_errors() {
        let result = walk_template_dir(Path::new("/nonexistent/template/dir"), ".tmpl");
        assert!(matches!(result, Err(CompileError::Walk { .. })));
    }

    #[test]
    fn test_walk_multi_dot_names_keep_inner_extension() {
        let dir = TempDir::new().unwrap();
        create_file(dir.path(), "feed.xml.tmpl", "");

        let files = walk_template_dir(dir.path(), ".tmpl").unwrap();
        assert_eq!(files[0].name, "feed.xml");
    }
}
