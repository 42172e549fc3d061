//! Risk scanner
//!
//! Evaluates the per-language rule tables against one file's content and
//! returns at most one hit: the oversized-file check runs first, then the
//! line-based pass in table order, then the file-scoped pass. The scan
//! short-circuits on the first match to keep cost bounded on large trees.

pub mod rules;

use crate::models::{Language, RiskKind};
use rules::{RiskRule, RuleCheck};
use tracing::trace;

/// Line count above which a file is flagged as a god module.
pub const GOD_MODULE_LINES: usize = 800;

/// A single rule match inside one file.
#[derive(Debug, Clone)]
pub struct RiskHit {
    pub rule_id: &'static str,
    pub kind: RiskKind,
    /// 1-based; 0 for file-scoped rules.
    pub line: u32,
    pub message: String,
}

fn rules_for(language: Language) -> &'static [RiskRule] {
    match language {
        Language::Python => rules::py_rules(),
        Language::JavaScript | Language::TypeScript => rules::js_rules(),
    }
}

/// Comment heuristic: skipping these lines cuts the obvious false positives
/// without pretending to parse the language.
fn is_comment_line(line: &str, language: Language) -> bool {
    let trimmed = line.trim_start();
    match language {
        Language::Python => trimmed.starts_with('#'),
        Language::JavaScript | Language::TypeScript => {
            trimmed.starts_with("//") || trimmed.starts_with('*')
        }
    }
}

/// Scan one file's content. Returns the first matching rule, or `None`.
pub fn scan_file(content: &str, language: Language) -> Option<RiskHit> {
    let lines: Vec<&str> = content.lines().collect();

    // Structural check first: an oversized file is flagged at line 1
    // regardless of what it contains.
    if lines.len() > GOD_MODULE_LINES {
        return Some(RiskHit {
            rule_id: "RR-LINT-001",
            kind: RiskKind::GodModule,
            line: 1,
            message: format!("File length: {} lines", lines.len()),
        });
    }

    let table = rules_for(language);

    // Line pass: earliest matching line wins; table order breaks ties.
    for (i, line) in lines.iter().enumerate() {
        if is_comment_line(line, language) {
            continue;
        }
        for rule in table {
            let matched = match &rule.check {
                RuleCheck::Line(re) => re.is_match(line),
                RuleCheck::LineWhere(pred) => pred(line),
                RuleCheck::File(_) | RuleCheck::FileWhere(_) => false,
            };
            if matched {
                trace!("rule {} hit at line {}", rule.id, i + 1);
                return Some(RiskHit {
                    rule_id: rule.id,
                    kind: rule.kind,
                    line: (i + 1) as u32,
                    message: rule.message.to_string(),
                });
            }
        }
    }

    // File pass: whole-content rules report line 0.
    for rule in table {
        let matched = match &rule.check {
            RuleCheck::File(re) => re.is_match(content),
            RuleCheck::FileWhere(pred) => pred(content),
            RuleCheck::Line(_) | RuleCheck::LineWhere(_) => false,
        };
        if matched {
            trace!("file-scoped rule {} hit", rule.id);
            return Some(RiskHit {
                rule_id: rule.id,
                kind: rule.kind,
                line: 0,
                message: rule.message.to_string(),
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_system_hit_at_line() {
        let content = "import os\n\nos.system(cmd)\n";
        let hit = scan_file(content, Language::Python).expect("should match");
        assert_eq!(hit.rule_id, "RR-SEC-006");
        assert_eq!(hit.kind, RiskKind::SecurityRisk);
        assert_eq!(hit.line, 3);
    }

    #[test]
    fn test_first_match_suppresses_later_rules() {
        // os.system on line 2, requests-without-timeout on line 4:
        // only the earlier hit is reported.
        let content = "import os\nos.system(cmd)\nimport requests\nrequests.get(url)\n";
        let hit = scan_file(content, Language::Python).expect("should match");
        assert_eq!(hit.rule_id, "RR-SEC-006");
        assert_eq!(hit.line, 2);
    }

    #[test]
    fn test_comment_lines_excluded() {
        let js = "// eval(userInput)\n * eval(more)\nconst x = 1;\n";
        assert!(scan_file(js, Language::JavaScript).is_none());

        let py = "# os.system(cmd)\nx = 1\n";
        assert!(scan_file(py, Language::Python).is_none());
    }

    #[test]
    fn test_god_module_beats_content_rules() {
        let mut content = String::from("eval(x)\n");
        for _ in 0..GOD_MODULE_LINES {
            content.push_str("const pad = 1;\n");
        }
        let hit = scan_file(&content, Language::JavaScript).expect("should match");
        assert_eq!(hit.rule_id, "RR-LINT-001");
        assert_eq!(hit.kind, RiskKind::GodModule);
        assert_eq!(hit.line, 1);
    }

    #[test]
    fn test_file_scoped_rule_reports_line_zero() {
        let content = "const app = express();\napp.listen(3000);\n";
        let hit = scan_file(content, Language::JavaScript).expect("should match");
        assert_eq!(hit.rule_id, "RR-ERR-001");
        assert_eq!(hit.line, 0);
    }

    #[test]
    fn test_clean_file_has_no_hit() {
        let content = "export function add(a: number, b: number) {\n  return a + b;\n}\n";
        assert!(scan_file(content, Language::TypeScript).is_none());
    }
}
