//! Root-level project hygiene checks
//!
//! Examines the immediate children of the analyzed root only (never
//! recursive): test directory, CI configuration, and a consolidated
//! operational-basics check (container file, dependency lockfile, env
//! template, .gitignore). Each emitted issue counts as one operational
//! gap toward the score.

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// One hygiene failure, not yet locale-resolved.
#[derive(Debug, Clone)]
pub struct HygieneIssue {
    pub rule_id: &'static str,
    /// Dynamic evidence; `None` means the catalog's static evidence applies.
    pub evidence: Option<String>,
}

// Substring matches, not anchored: `specs/`, `unit_tests/`, or
// `ci-jenkins/` all satisfy the checks.
fn tests_dir_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)tests?|spec").unwrap())
}

fn ci_dir_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\.github|\.circleci|jenkins|gitlab").unwrap())
}

fn docker_file_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)dockerfile|docker-compose").unwrap())
}

const LOCKFILES: &[&str] = &[
    "requirements.txt",
    "poetry.lock",
    "pyproject.toml",
    "package-lock.json",
    "pnpm-lock.yaml",
    "yarn.lock",
    "Cargo.lock",
];

/// Audit the root directory's immediate children.
///
/// Produces at most three issues: `RR-TEST-001`, `RR-CI-001`, and one
/// consolidated `RR-OPS-001` whose evidence lists every missing artifact.
pub fn check_root(root: &Path) -> Vec<HygieneIssue> {
    let entries = match fs::read_dir(root) {
        Ok(rd) => rd,
        Err(err) => {
            warn!(root = %root.display(), error = %err, "cannot list root for hygiene checks");
            return Vec::new();
        }
    };

    let mut dir_names: Vec<String> = Vec::new();
    let mut file_names: Vec<String> = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        match entry.file_type() {
            Ok(ft) if ft.is_dir() => dir_names.push(name),
            Ok(_) => file_names.push(name),
            Err(err) => debug!(error = %err, "skipping unreadable root entry"),
        }
    }

    let mut issues = Vec::new();

    if !dir_names.iter().any(|d| tests_dir_re().is_match(d)) {
        issues.push(HygieneIssue {
            rule_id: "RR-TEST-001",
            evidence: None,
        });
    }

    if !dir_names.iter().any(|d| ci_dir_re().is_match(d)) {
        issues.push(HygieneIssue {
            rule_id: "RR-CI-001",
            evidence: None,
        });
    }

    let mut gaps: Vec<&str> = Vec::new();
    let has_docker = file_names.iter().any(|f| docker_file_re().is_match(f));
    if !has_docker {
        gaps.push("\u{2718} No Dockerfile or docker-compose file found");
    }
    if !file_names.iter().any(|f| LOCKFILES.contains(&f.as_str())) {
        gaps.push("\u{2718} No dependency lockfile found");
    }
    if !file_names
        .iter()
        .any(|f| f == ".env.example" || f == ".env.sample")
    {
        gaps.push("\u{2718} No .env.example template found");
    }
    if !file_names.iter().any(|f| f == ".gitignore") {
        gaps.push("\u{2718} No .gitignore found");
    }
    if !gaps.is_empty() {
        issues.push(HygieneIssue {
            rule_id: "RR-OPS-001",
            evidence: Some(gaps.join("\n")),
        });
    }

    debug!(count = issues.len(), "hygiene pass complete");
    issues
}

/// Whether a Python source configures any logging at all.
///
/// Feeds the repo-wide logging audit: when the tree has Python files and
/// none of them pass this check, the pipeline emits `RR-LOG-001`.
pub fn configures_logging(content: &str) -> bool {
    content.contains("import logging") || content.contains("loguru")
}
