//! Source tree walker
//!
//! Enumerates analyzable source files under a root. Directories on the
//! skip-list are pruned before descent, so large dependency caches and build
//! outputs never get expanded. Unreadable directories are skipped silently;
//! a permission error must never kill the run.

use crate::models::{FileEntry, Language};
use std::path::Path;
use tracing::debug;

/// Directory names never descended into.
pub const SKIP_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".next",
    "dist",
    "build",
    "out",
    ".turbo",
    "__pycache__",
    "venv",
    ".venv",
    "target",
];

/// Collect all analyzable files under `root`.
///
/// `extra_skip` extends the built-in skip-list (from `shipcheck.toml`).
/// Output order carries no guarantee; callers that need determinism sort.
pub fn walk_tree(root: &Path, extra_skip: &[String]) -> Vec<FileEntry> {
    let extra: Vec<String> = extra_skip.to_vec();

    let walker = ignore::WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .ignore(false)
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !SKIP_DIRS.contains(&name.as_ref()) && !extra.iter().any(|s| s == name.as_ref())
        })
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                // Permission errors and broken symlinks are expected on
                // arbitrary trees.
                debug!("walk error skipped: {}", e);
                continue;
            }
        };
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        if let Some(language) = Language::from_path(entry.path()) {
            files.push(FileEntry {
                path: entry.path().to_path_buf(),
                language,
            });
        }
    }

    debug!("walked {} analyzable files under {}", files.len(), root.display());
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_walk_collects_allowed_extensions_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("app.py"), "print('hi')\n").unwrap();
        fs::write(dir.path().join("index.ts"), "export {}\n").unwrap();
        fs::write(dir.path().join("notes.md"), "# notes\n").unwrap();

        let files = walk_tree(dir.path(), &[]);
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_walk_prunes_skip_dirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("node_modules/lodash")).unwrap();
        fs::write(
            dir.path().join("node_modules/lodash/index.js"),
            "module.exports = {}\n",
        )
        .unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/main.js"), "console.info('x')\n").unwrap();

        let files = walk_tree(dir.path(), &[]);
        assert_eq!(files.len(), 1);
        assert!(files[0].path.ends_with("src/main.js"));
    }

    #[test]
    fn test_walk_honors_extra_skip() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("generated")).unwrap();
        fs::write(dir.path().join("generated/gen.py"), "x = 1\n").unwrap();
        fs::write(dir.path().join("main.py"), "x = 1\n").unwrap();

        let files = walk_tree(dir.path(), &["generated".to_string()]);
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_walk_missing_root_is_empty() {
        let files = walk_tree(Path::new("/nonexistent/shipcheck-test"), &[]);
        assert!(files.is_empty());
    }
}
