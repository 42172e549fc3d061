//! Core data models for shipcheck
//!
//! These models are used throughout the crate for representing analyzed
//! files, findings, and the final readiness report. The serialized form of
//! [`AnalysisResult`] (camelCase) is the stable contract consumed by
//! downstream renderers and AI-diagnosis enrichment.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Generate a deterministic finding fingerprint based on content hash.
///
/// Fingerprints are stable across runs, enabling:
/// - Tracking findings over time (fixed vs new vs recurring)
/// - Suppression by fingerprint
/// - Reliable deduplication
///
/// The fingerprint is a 16-character hex string derived from hashing the
/// rule id, file path, line number, and title.
pub fn finding_fingerprint(rule_id: &str, file: &str, line: u32, title: &str) -> String {
    let input = format!("{rule_id}\n{file}\n{line}\n{title}");
    let digest = Sha256::digest(input.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    hex[..16].to_string()
}

/// Risk classification carried by every finding.
///
/// `SecurityRisk` findings feed the security counter in scoring;
/// `CircularDependency` findings are counted per cycle; the remaining kinds
/// carry no direct score penalty of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RiskKind {
    SecurityRisk,
    #[default]
    ProductionRisk,
    CircularDependency,
    GodModule,
    SyntaxError,
}

impl std::fmt::Display for RiskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskKind::SecurityRisk => write!(f, "SecurityRisk"),
            RiskKind::ProductionRisk => write!(f, "ProductionRisk"),
            RiskKind::CircularDependency => write!(f, "CircularDependency"),
            RiskKind::GodModule => write!(f, "GodModule"),
            RiskKind::SyntaxError => write!(f, "SyntaxError"),
        }
    }
}

/// Business-facing finding category, resolved from the locale catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    Security,
    #[serde(rename = "Service Interruption")]
    ServiceInterruption,
    Scalability,
    #[default]
    Maintenance,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Security => write!(f, "Security"),
            Category::ServiceInterruption => write!(f, "Service Interruption"),
            Category::Scalability => write!(f, "Scalability"),
            Category::Maintenance => write!(f, "Maintenance"),
        }
    }
}

/// A single readiness finding.
///
/// `id` is the stable rule identifier (e.g. `RR-SEC-001`) that downstream
/// consumers key on; `fingerprint` identifies this specific occurrence.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub id: String,
    pub fingerprint: String,
    pub title: String,
    /// Path relative to the analyzed root, or `Repository Root` for
    /// root-scoped findings.
    pub file: String,
    /// 1-based line number; 0 for file- or root-scoped findings.
    pub line: u32,
    #[serde(rename = "type")]
    pub kind: RiskKind,
    pub category: Category,
    pub evidence: String,
    pub standard: String,
    pub impact: String,
    pub action: String,
    pub reference: String,
    pub when_it_matters: String,
}

/// Summary counters accumulated during one run.
///
/// These counters, not the findings list, are the source of truth for
/// scoring.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub total_files: usize,
    pub python_files: usize,
    pub js_ts_files: usize,
    pub security_risks: usize,
    pub operational_gaps: usize,
    pub cycle_count: usize,
}

/// Three-tier readiness status derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Ready for Production")]
    Ready,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
    #[serde(rename = "Not Ready for Deployment")]
    NotReady,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Ready => write!(f, "Ready for Production"),
            Status::NeedsAttention => write!(f, "Needs Attention"),
            Status::NotReady => write!(f, "Not Ready for Deployment"),
        }
    }
}

/// Final output of one analysis run. Computed once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub score: i32,
    pub status: Status,
    pub findings: Vec<Finding>,
    pub metrics: Metrics,
    /// Path of the exported graph interchange file, when a graph dir was set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_path: Option<PathBuf>,
    pub disclosure: String,
    pub cta: String,
}

/// Language tag derived from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
}

impl Language {
    /// Classify a path by extension. Returns `None` for extensions outside
    /// the analyzable allow-list.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str())? {
            "py" => Some(Language::Python),
            "js" | "jsx" | "mjs" | "cjs" => Some(Language::JavaScript),
            "ts" | "tsx" => Some(Language::TypeScript),
            _ => None,
        }
    }
}

/// A source file discovered by the tree walker.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub path: PathBuf,
    pub language: Language,
}
