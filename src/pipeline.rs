//! Analysis pipeline
//!
//! `analyze` wires the stages together: validate root, walk the tree, run
//! the root hygiene pass, fan the per-file scans out over a rayon pool,
//! merge at a single collection point, build the import graph, detect
//! cycles, score, and assemble the result. Per-file problems (unreadable
//! content, interpreter failures) are logged and skipped; only an invalid
//! root aborts the run.

use crate::graph::{self, cycles};
use crate::hygiene;
use crate::locale;
use crate::models::{
    finding_fingerprint, AnalysisResult, FileEntry, Finding, Language, Metrics, RiskKind,
};
use crate::scanner::{self, RiskHit};
use crate::score;
use crate::syntax::{self, SyntaxIssue};
use crate::walker;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Terminal analysis failures. Everything else degrades to a skipped file.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("root path does not exist: {0}")]
    RootNotFound(PathBuf),
    #[error("root path is not a directory: {0}")]
    RootNotDirectory(PathBuf),
    #[error("worker pool could not be built: {0}")]
    PoolBuild(#[from] rayon::ThreadPoolBuildError),
}

/// Tunable analysis options, builder style.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Locale tag for finding text.
    pub lang: String,
    /// When set, the graph interchange JSON is exported here.
    pub graph_dir: Option<PathBuf>,
    /// Scan worker threads; 0 lets the pool size itself.
    pub workers: usize,
    /// Run the bounded Python compile check per file.
    pub syntax_check: bool,
    /// Directory names pruned in addition to the built-in skip set.
    pub extra_skip_dirs: Vec<String>,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            graph_dir: None,
            workers: 0,
            syntax_check: false,
            extra_skip_dirs: Vec::new(),
        }
    }
}

impl AnalyzeOptions {
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn with_graph_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.graph_dir = Some(dir.into());
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_syntax_check(mut self, enabled: bool) -> Self {
        self.syntax_check = enabled;
        self
    }

    pub fn with_extra_skip_dirs(mut self, dirs: Vec<String>) -> Self {
        self.extra_skip_dirs = dirs;
        self
    }
}

/// Outcome of scanning one file, merged single-threaded afterwards.
struct FileScan {
    path: PathBuf,
    hit: Option<RiskHit>,
    syntax_issue: Option<SyntaxIssue>,
    configures_logging: bool,
}

/// Run a full readiness audit over the tree rooted at `root`.
pub fn analyze(root: &Path, options: &AnalyzeOptions) -> Result<AnalysisResult, AnalyzeError> {
    if !root.exists() {
        return Err(AnalyzeError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(AnalyzeError::RootNotDirectory(root.to_path_buf()));
    }
    let root = root
        .canonicalize()
        .map_err(|_| AnalyzeError::RootNotFound(root.to_path_buf()))?;

    info!(root = %root.display(), lang = %options.lang, "starting readiness audit");

    let files = walker::walk_tree(&root, &options.extra_skip_dirs);

    let mut metrics = Metrics {
        total_files: files.len(),
        ..Metrics::default()
    };
    for entry in &files {
        match entry.language {
            Language::Python => metrics.python_files += 1,
            Language::JavaScript | Language::TypeScript => metrics.js_ts_files += 1,
        }
    }

    let mut findings: Vec<Finding> = Vec::new();

    // Root hygiene pass; each issue is one operational gap.
    for issue in hygiene::check_root(&root) {
        metrics.operational_gaps += 1;
        findings.push(make_finding(
            &options.lang,
            issue.rule_id,
            RiskKind::ProductionRisk,
            "Repository Root",
            0,
            issue.evidence.as_deref().unwrap_or(""),
        ));
    }

    // Per-file fan-out. Each file is scanned independently; nothing is
    // shared during the pass, results merge below.
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.workers)
        .build()?;
    let syntax_enabled = options.syntax_check;
    let mut scans: Vec<FileScan> = pool.install(|| {
        files
            .par_iter()
            .filter_map(|entry| scan_one(entry, syntax_enabled))
            .collect()
    });
    // The walker gives no ordering guarantee; findings must be stable
    // across runs over identical input.
    scans.sort_by(|a, b| a.path.cmp(&b.path));

    let mut any_logging = false;
    for scan in &scans {
        let rel = relative_display(&scan.path, &root);
        if let Some(hit) = &scan.hit {
            if hit.kind == RiskKind::SecurityRisk {
                metrics.security_risks += 1;
            }
            findings.push(make_finding(
                &options.lang,
                hit.rule_id,
                hit.kind,
                &rel,
                hit.line,
                &hit.message,
            ));
        }
        if let Some(issue) = &scan.syntax_issue {
            findings.push(make_finding(
                &options.lang,
                "RR-SYN-001",
                RiskKind::SyntaxError,
                &rel,
                issue.line,
                &issue.message,
            ));
        }
        any_logging |= scan.configures_logging;
    }

    // Repo-wide logging audit: a Python tree with no logger configured
    // anywhere is an operational gap.
    if metrics.python_files > 0 && !any_logging {
        metrics.operational_gaps += 1;
        findings.push(make_finding(
            &options.lang,
            "RR-LOG-001",
            RiskKind::ProductionRisk,
            "Repository Root",
            0,
            "",
        ));
    }

    let dep_graph = graph::build_graph(&files);
    let cycle_list = cycles::find_cycles(&dep_graph);
    metrics.cycle_count = cycle_list.len();
    for cycle in &cycle_list {
        let trail = cycle
            .iter()
            .map(|p| relative_display(p, &root))
            .collect::<Vec<_>>()
            .join(" -> ");
        let anchor = cycle
            .first()
            .map(|p| relative_display(p, &root))
            .unwrap_or_default();
        findings.push(make_finding(
            &options.lang,
            "RR-DEP-001",
            RiskKind::CircularDependency,
            &anchor,
            0,
            &format!("Cycle: {trail}"),
        ));
    }

    let graph_path = options
        .graph_dir
        .as_deref()
        .and_then(|dir| export_graph(dir, &dep_graph, &cycle_list));

    let score_value = score::compute_score(
        metrics.operational_gaps as u32,
        metrics.security_risks as u32,
        metrics.cycle_count as u32,
    );
    let status = score::status_for(score_value);

    info!(
        score = score_value,
        findings = findings.len(),
        "analysis completed"
    );

    Ok(AnalysisResult {
        score: score_value,
        status,
        findings,
        metrics,
        graph_path,
        disclosure: locale::disclosure(&options.lang).to_string(),
        cta: locale::cta(&options.lang).to_string(),
    })
}

fn scan_one(entry: &FileEntry, syntax_enabled: bool) -> Option<FileScan> {
    let content = match fs::read_to_string(&entry.path) {
        Ok(content) => content,
        Err(err) => {
            debug!(file = %entry.path.display(), error = %err, "skipping unreadable file");
            return None;
        }
    };
    let hit = scanner::scan_file(&content, entry.language);
    let is_python = entry.language == Language::Python;
    let syntax_issue = if syntax_enabled && is_python {
        syntax::check_python_file(&entry.path)
    } else {
        None
    };
    Some(FileScan {
        path: entry.path.clone(),
        hit,
        syntax_issue,
        configures_logging: is_python && hygiene::configures_logging(&content),
    })
}

/// Resolve a finding from the locale catalog. Static catalog evidence wins
/// over the dynamic message when present.
fn make_finding(
    lang: &str,
    rule_id: &str,
    kind: RiskKind,
    file: &str,
    line: u32,
    dynamic_evidence: &str,
) -> Finding {
    let detail = locale::resolve(lang, rule_id, kind);
    let evidence = if detail.evidence.is_empty() {
        dynamic_evidence.to_string()
    } else {
        detail.evidence.to_string()
    };
    Finding {
        id: rule_id.to_string(),
        fingerprint: finding_fingerprint(rule_id, file, line, detail.title),
        title: detail.title.to_string(),
        file: file.to_string(),
        line,
        kind,
        category: detail.category,
        evidence,
        standard: detail.standard.to_string(),
        impact: detail.impact.to_string(),
        action: detail.action.to_string(),
        reference: detail.reference.to_string(),
        when_it_matters: detail.when_it_matters.to_string(),
    }
}

fn relative_display(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

/// Write the interchange JSON for the external visualizer. Failure is
/// logged and the result simply carries no graph path.
fn export_graph(
    dir: &Path,
    dep_graph: &graph::DependencyGraph,
    cycle_list: &[Vec<PathBuf>],
) -> Option<PathBuf> {
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "graph dir does not exist, skipping export");
        return None;
    }
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let json_path = dir.join(format!("graph_{millis}.json"));
    let image_path = dir.join(format!("graph_{millis}.png"));
    let value = graph::interchange_json(dep_graph, cycle_list, &image_path);
    match serde_json::to_string_pretty(&value) {
        Ok(body) => match fs::write(&json_path, body) {
            Ok(()) => {
                debug!(path = %json_path.display(), "graph interchange exported");
                Some(json_path)
            }
            Err(err) => {
                warn!(path = %json_path.display(), error = %err, "graph export failed");
                None
            }
        },
        Err(err) => {
            warn!(error = %err, "graph serialization failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_root_is_an_error() {
        let err = analyze(Path::new("/definitely/not/here"), &AnalyzeOptions::default())
            .unwrap_err();
        assert!(matches!(err, AnalyzeError::RootNotFound(_)));
    }

    #[test]
    fn test_file_root_is_an_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = analyze(file.path(), &AnalyzeOptions::default()).unwrap_err();
        assert!(matches!(err, AnalyzeError::RootNotDirectory(_)));
    }

    #[test]
    fn test_options_builder() {
        let options = AnalyzeOptions::default()
            .with_lang("ko")
            .with_workers(2)
            .with_syntax_check(true)
            .with_extra_skip_dirs(vec!["fixtures".to_string()]);
        assert_eq!(options.lang, "ko");
        assert_eq!(options.workers, 2);
        assert!(options.syntax_check);
    }
}
