//! Text (terminal) reporter with colors and formatting

use crate::models::{AnalysisResult, RiskKind, Status};
use anyhow::Result;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Status colors (ANSI escape codes)
fn status_color(status: Status) -> &'static str {
    match status {
        Status::Ready => "\x1b[32m",          // Green
        Status::NeedsAttention => "\x1b[33m", // Yellow
        Status::NotReady => "\x1b[31m",       // Red
    }
}

/// Kind colors
fn kind_color(kind: RiskKind) -> &'static str {
    match kind {
        RiskKind::SecurityRisk => "\x1b[31m",       // Red
        RiskKind::SyntaxError => "\x1b[91m",        // Light red
        RiskKind::CircularDependency => "\x1b[33m", // Yellow
        RiskKind::GodModule => "\x1b[34m",          // Blue
        RiskKind::ProductionRisk => "\x1b[90m",     // Gray
    }
}

/// Kind tag
fn kind_tag(kind: RiskKind) -> &'static str {
    match kind {
        RiskKind::SecurityRisk => "[SEC]",
        RiskKind::SyntaxError => "[SYN]",
        RiskKind::CircularDependency => "[DEP]",
        RiskKind::GodModule => "[BIG]",
        RiskKind::ProductionRisk => "[OPS]",
    }
}

/// Render the audit result as formatted terminal output
pub fn render(result: &AnalysisResult) -> Result<String> {
    let mut out = String::new();

    let status_c = status_color(result.status);
    out.push_str(&format!("\n{BOLD}Shipcheck Audit{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Score: {BOLD}{}/95{RESET}  Status: {status_c}{BOLD}{}{RESET}\n",
        result.score, result.status
    ));

    let m = &result.metrics;
    out.push_str(&format!(
        "Files: {} ({} py, {} js/ts)  Security: {}  Gaps: {}  Cycles: {}\n\n",
        m.total_files, m.python_files, m.js_ts_files, m.security_risks, m.operational_gaps,
        m.cycle_count
    ));

    out.push_str(&format!(
        "{BOLD}FINDINGS{RESET} ({} total)\n",
        result.findings.len()
    ));
    for finding in &result.findings {
        let color = kind_color(finding.kind);
        let location = if finding.line > 0 {
            format!("{}:{}", finding.file, finding.line)
        } else {
            finding.file.clone()
        };
        out.push_str(&format!(
            "  {color}{}{RESET} {BOLD}{}{RESET} {DIM}({}){RESET}\n      {}\n",
            kind_tag(finding.kind),
            finding.title,
            location,
            finding.action,
        ));
        if !finding.evidence.is_empty() {
            for line in finding.evidence.lines() {
                out.push_str(&format!("      {DIM}{line}{RESET}\n"));
            }
        }
    }
    if result.findings.is_empty() {
        out.push_str(&format!("  {DIM}none{RESET}\n"));
    }

    if let Some(path) = &result.graph_path {
        out.push_str(&format!("\nGraph data: {}\n", path.display()));
    }

    out.push_str(&format!("\n{DIM}{}{RESET}\n", result.disclosure));
    out.push_str(&format!("{DIM}{}{RESET}\n", result.cta));

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Finding, Metrics};

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            score: 50,
            status: Status::NotReady,
            findings: vec![Finding {
                id: "RR-SEC-001".to_string(),
                fingerprint: "abcd".to_string(),
                title: "Security Vulnerability Detected".to_string(),
                file: "app.py".to_string(),
                line: 3,
                kind: RiskKind::SecurityRisk,
                category: Category::Security,
                evidence: "eval() on request input".to_string(),
                standard: String::new(),
                impact: String::new(),
                action: "Remove eval".to_string(),
                reference: String::new(),
                when_it_matters: String::new(),
            }],
            metrics: Metrics {
                total_files: 1,
                python_files: 1,
                security_risks: 1,
                ..Metrics::default()
            },
            graph_path: None,
            disclosure: "disclosure".to_string(),
            cta: "cta".to_string(),
        }
    }

    #[test]
    fn test_render_contains_key_fields() {
        let out = render(&sample_result()).unwrap();
        assert!(out.contains("50/95"));
        assert!(out.contains("Not Ready for Deployment"));
        assert!(out.contains("app.py:3"));
        assert!(out.contains("[SEC]"));
        assert!(out.contains("eval() on request input"));
    }

    #[test]
    fn test_render_empty_findings() {
        let mut result = sample_result();
        result.findings.clear();
        result.score = 95;
        result.status = Status::Ready;
        let out = render(&result).unwrap();
        assert!(out.contains("none"));
        assert!(out.contains("Ready for Production"));
    }
}
