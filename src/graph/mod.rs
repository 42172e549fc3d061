//! Import dependency graph
//!
//! Builds a directed file-to-file graph from best-effort textual import
//! extraction. Three extraction rules run over whole file content:
//! ES-style `import ... from "spec"`, CommonJS `require("spec")`, and
//! `from "spec" import`. Only lexically relative specifiers are considered;
//! package imports are expected and dropped without comment. This is
//! deliberately not an AST — it trades precision for running on anything.

pub mod cycles;

use crate::models::FileEntry;
use regex::Regex;
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

/// Adjacency mapping: file -> set of files it imports.
///
/// Ordered maps keep traversal deterministic across runs, which keeps the
/// whole analysis idempotent down to finding order.
pub type DependencyGraph = BTreeMap<PathBuf, BTreeSet<PathBuf>>;

static IMPORT_PATTERN: OnceLock<Regex> = OnceLock::new();
static REQUIRE_PATTERN: OnceLock<Regex> = OnceLock::new();
static FROM_IMPORT_PATTERN: OnceLock<Regex> = OnceLock::new();

fn import_pattern() -> &'static Regex {
    IMPORT_PATTERN.get_or_init(|| Regex::new(r#"import\s+[^'"]*['"]([^'"]+)['"]"#).unwrap())
}

fn require_pattern() -> &'static Regex {
    REQUIRE_PATTERN.get_or_init(|| Regex::new(r#"require\(\s*['"]([^'"]+)['"]\s*\)"#).unwrap())
}

fn from_import_pattern() -> &'static Regex {
    FROM_IMPORT_PATTERN.get_or_init(|| Regex::new(r#"from\s+['"]([^'"]+)['"]\s+import"#).unwrap())
}

/// Extract raw import specifiers from file content, filtered to the ones
/// that look relative (`./`, `../`, or containing a dot).
pub fn extract_specifiers(content: &str) -> Vec<String> {
    let mut specs = Vec::new();
    for re in [import_pattern(), require_pattern(), from_import_pattern()] {
        for caps in re.captures_iter(content) {
            if let Some(m) = caps.get(1) {
                specs.push(m.as_str().to_string());
            }
        }
    }
    specs
        .into_iter()
        .filter(|s| s.starts_with("./") || s.starts_with("../") || s.contains('.'))
        .collect()
}

/// Candidate suffixes tried when resolving a specifier, in order.
const SUFFIX_CANDIDATES: &[&str] = &[".py", ".ts", ".tsx", ".js", ".jsx"];

/// Package-index conventions tried after the suffix candidates.
const INDEX_CANDIDATES: &[&str] = &["__init__.py", "index.ts", "index.js"];

/// Resolve a specifier against the source file's directory.
///
/// The first candidate that exists as a regular file wins; the result is
/// canonicalized so graph nodes compare equal regardless of `..` segments
/// in the specifier. `None` means no edge (external import or typo), which
/// is not an error.
pub fn resolve_specifier(source: &Path, spec: &str) -> Option<PathBuf> {
    let base = source.parent()?.join(spec);

    let mut candidates: Vec<PathBuf> = vec![base.clone()];
    for suffix in SUFFIX_CANDIDATES {
        let mut with_suffix = base.clone().into_os_string();
        with_suffix.push(suffix);
        candidates.push(PathBuf::from(with_suffix));
    }
    for index in INDEX_CANDIDATES {
        candidates.push(base.join(index));
    }

    for candidate in candidates {
        if candidate.is_file() {
            return candidate.canonicalize().ok();
        }
    }
    None
}

/// Build the dependency graph for a set of walked files.
///
/// Files that cannot be read are skipped; a file appears as a key only when
/// at least one of its specifiers resolved. A specifier that resolves back
/// to its own file still produces the (self-loop) edge.
pub fn build_graph(files: &[FileEntry]) -> DependencyGraph {
    let mut graph = DependencyGraph::new();

    for entry in files {
        let content = match std::fs::read_to_string(&entry.path) {
            Ok(c) => c,
            Err(e) => {
                debug!("unreadable during graph build, skipped {}: {}", entry.path.display(), e);
                continue;
            }
        };
        let source = entry
            .path
            .canonicalize()
            .unwrap_or_else(|_| entry.path.clone());

        for spec in extract_specifiers(&content) {
            if let Some(target) = resolve_specifier(&source, &spec) {
                graph.entry(source.clone()).or_default().insert(target);
            }
        }
    }

    debug!(
        "dependency graph: {} nodes with edges, {} edges total",
        graph.len(),
        graph.values().map(|t| t.len()).sum::<usize>()
    );
    graph
}

/// Serialize the graph and cycle list into the interchange object the
/// external visualizer consumes.
pub fn interchange_json(
    graph: &DependencyGraph,
    cycles: &[Vec<PathBuf>],
    output_path: &Path,
) -> serde_json::Value {
    let edges: Vec<[String; 2]> = graph
        .iter()
        .flat_map(|(source, targets)| {
            targets.iter().map(move |target| {
                [
                    source.to_string_lossy().into_owned(),
                    target.to_string_lossy().into_owned(),
                ]
            })
        })
        .collect();

    let cycle_paths: Vec<Vec<String>> = cycles
        .iter()
        .map(|cycle| {
            cycle
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect()
        })
        .collect();

    json!({
        "edges": edges,
        "cycles": cycle_paths,
        "output_path": output_path.to_string_lossy(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Language;
    use std::fs;

    fn entry(path: &Path, language: Language) -> FileEntry {
        FileEntry {
            path: path.to_path_buf(),
            language,
        }
    }

    #[test]
    fn test_extract_all_three_forms() {
        let content = r#"
import { thing } from "./lib/thing";
const util = require("../util");
from "./sibling.py" import
"#;
        let specs = extract_specifiers(content);
        assert!(specs.contains(&"./lib/thing".to_string()));
        assert!(specs.contains(&"../util".to_string()));
        assert!(specs.contains(&"./sibling.py".to_string()));
    }

    #[test]
    fn test_package_specifiers_filtered_out() {
        let content = r#"import foo from "lodash";
const express = require("express");"#;
        assert!(extract_specifiers(content).is_empty());
    }

    #[test]
    fn test_resolution_tries_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.js"), "").unwrap();
        let source = dir.path().join("a.js");
        fs::write(&source, "").unwrap();

        let resolved = resolve_specifier(&source, "./b").expect("should resolve");
        assert_eq!(resolved.file_name().unwrap(), "b.js");
    }

    #[test]
    fn test_resolution_tries_package_index() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("pkg")).unwrap();
        fs::write(dir.path().join("pkg/__init__.py"), "").unwrap();
        let source = dir.path().join("a.py");
        fs::write(&source, "").unwrap();

        let resolved = resolve_specifier(&source, "./pkg").expect("should resolve");
        assert_eq!(resolved.file_name().unwrap(), "__init__.py");
    }

    #[test]
    fn test_unresolvable_specifier_creates_no_edge() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.js");
        fs::write(&a, "import foo from \"./missing\";\nimport l from \"lodash\";\n").unwrap();

        let graph = build_graph(&[entry(&a, Language::JavaScript)]);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_self_import_keeps_edge() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.js");
        fs::write(&a, "const me = require(\"./a\");\n").unwrap();

        let graph = build_graph(&[entry(&a, Language::JavaScript)]);
        let key = a.canonicalize().unwrap();
        assert!(graph.get(&key).map(|t| t.contains(&key)).unwrap_or(false));
    }

    #[test]
    fn test_interchange_shape() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.js");
        let b = dir.path().join("b.js");
        fs::write(&a, "require(\"./b\");\n").unwrap();
        fs::write(&b, "").unwrap();

        let graph = build_graph(&[entry(&a, Language::JavaScript)]);
        let value = interchange_json(&graph, &[], Path::new("/tmp/out.png"));
        assert_eq!(value["edges"].as_array().unwrap().len(), 1);
        assert_eq!(value["cycles"].as_array().unwrap().len(), 0);
        assert_eq!(value["output_path"], "/tmp/out.png");
    }
}
