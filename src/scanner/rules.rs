//! Per-language risk rule tables
//!
//! Rules are declarative records consumed by the generic evaluation loop in
//! the parent module, not chains of conditionals. Each rule is either a
//! regex (per-line or whole-file) or a predicate (per-line or whole-file),
//! tagged with its risk kind and a stable rule id. Table order is the
//! priority order: the first rule to match a file wins.

use crate::models::RiskKind;
use regex::Regex;
use std::sync::OnceLock;

/// How a rule inspects a file.
pub enum RuleCheck {
    /// Regex evaluated against each non-comment line.
    Line(Regex),
    /// Predicate evaluated against each non-comment line.
    LineWhere(fn(&str) -> bool),
    /// Regex evaluated against the whole file content (line 0).
    File(Regex),
    /// Predicate evaluated against the whole file content (line 0).
    FileWhere(fn(&str) -> bool),
}

/// One declarative risk rule.
pub struct RiskRule {
    pub id: &'static str,
    pub kind: RiskKind,
    pub check: RuleCheck,
    pub message: &'static str,
}

fn re(pattern: &str) -> Regex {
    // Patterns are hardcoded constants; a failure here is a programming
    // error caught by the rule unit tests.
    Regex::new(pattern).expect("valid rule regex")
}

static JS_RULES: OnceLock<Vec<RiskRule>> = OnceLock::new();
static PY_RULES: OnceLock<Vec<RiskRule>> = OnceLock::new();

/// Rules for JavaScript/TypeScript sources.
pub fn js_rules() -> &'static [RiskRule] {
    JS_RULES.get_or_init(|| {
        vec![
            RiskRule {
                id: "RR-SEC-002",
                kind: RiskKind::SecurityRisk,
                check: RuleCheck::Line(re(r"eval\s*\(|new\s+Function\s*\(")),
                message: "[Security] Dynamic code execution detected (eval/new Function).",
            },
            RiskRule {
                id: "RR-SEC-003",
                kind: RiskKind::SecurityRisk,
                check: RuleCheck::Line(re(r"child_process\.(exec|execSync)\s*\(")),
                message: "[Security] Shell command execution detected. Sanitize inputs or use spawn without a shell.",
            },
            RiskRule {
                id: "RR-SEC-004",
                kind: RiskKind::SecurityRisk,
                check: RuleCheck::File(re(r"(?s)spawn\s*\(.*,\s*\{.*shell:\s*true")),
                message: "[Security] spawn with { shell: true } detected. This enables shell command injection.",
            },
            RiskRule {
                id: "RR-SEC-005",
                kind: RiskKind::SecurityRisk,
                check: RuleCheck::Line(re(
                    r#"(?i)(api[._-]?key|password|secret|token)\s*[:=]\s*['"][a-zA-Z0-9_-]{10,}['"]"#,
                )),
                message: "[Security] Hardcoded secret detected. Use environment variables.",
            },
            RiskRule {
                id: "RR-NET-001",
                kind: RiskKind::ProductionRisk,
                check: RuleCheck::LineWhere(js_http_missing_timeout),
                message: "[Reliability] HTTP call missing explicit timeout. This can cause cascading failures.",
            },
            RiskRule {
                id: "RR-ERR-001",
                kind: RiskKind::ProductionRisk,
                check: RuleCheck::FileWhere(js_listen_without_error_handler),
                message: "[Reliability] Server entry point found but no global error handler. Unhandled errors may crash the server.",
            },
            RiskRule {
                id: "RR-OBS-001",
                kind: RiskKind::ProductionRisk,
                check: RuleCheck::Line(re(r"console\.log\s*\(")),
                message: "[Observability] console.log used in production code. Use a structured logger (winston/pino).",
            },
        ]
    })
}

/// Rules for Python sources.
pub fn py_rules() -> &'static [RiskRule] {
    PY_RULES.get_or_init(|| {
        vec![
            RiskRule {
                id: "RR-SEC-001",
                kind: RiskKind::SecurityRisk,
                check: RuleCheck::Line(re(r"\b(eval|exec)\s*\(")),
                message: "[Security] Dynamic code execution detected (eval/exec).",
            },
            RiskRule {
                id: "RR-SEC-006",
                kind: RiskKind::SecurityRisk,
                check: RuleCheck::Line(re(r"\bos\.(system|popen)\s*\(")),
                message: "[Security] Shell command execution detected (os.system/os.popen).",
            },
            RiskRule {
                id: "RR-SEC-007",
                kind: RiskKind::SecurityRisk,
                check: RuleCheck::Line(re(
                    r"\bsubprocess\.(run|call|Popen|check_output|check_call)\s*\([^)]*shell\s*=\s*True",
                )),
                message: "[Security] subprocess call with shell=True detected. This enables shell command injection.",
            },
            RiskRule {
                id: "RR-SEC-008",
                kind: RiskKind::SecurityRisk,
                check: RuleCheck::Line(re(
                    r#"(?i)(api[._-]?key|password|secret|token)\s*[:=]\s*['"][a-zA-Z0-9_-]{10,}['"]"#,
                )),
                message: "[Security] Hardcoded secret detected. Use environment variables.",
            },
            RiskRule {
                id: "RR-NET-002",
                kind: RiskKind::ProductionRisk,
                check: RuleCheck::LineWhere(py_http_missing_timeout),
                message: "[Reliability] Outbound HTTP call missing timeout= argument. Hung sockets stall the caller.",
            },
            RiskRule {
                id: "RR-OBS-002",
                kind: RiskKind::ProductionRisk,
                check: RuleCheck::Line(re(r"^\s*print\s*\(")),
                message: "[Observability] print() used for logging. Use the logging module.",
            },
        ]
    })
}

static JS_HTTP_CALL: OnceLock<Regex> = OnceLock::new();
static JS_ERR_HANDLER: OnceLock<Regex> = OnceLock::new();
static PY_HTTP_CALL: OnceLock<Regex> = OnceLock::new();

fn js_http_missing_timeout(line: &str) -> bool {
    let call = JS_HTTP_CALL
        .get_or_init(|| re(r"(axios(\.[a-z]+)?|fetch|http\.(get|request))\s*\("));
    call.is_match(line) && !line.contains("timeout")
}

fn js_listen_without_error_handler(content: &str) -> bool {
    let handler = JS_ERR_HANDLER.get_or_init(|| re(r"app\.use\s*\(\s*\(\s*err"));
    content.contains("app.listen") && !handler.is_match(content)
}

fn py_http_missing_timeout(line: &str) -> bool {
    let call = PY_HTTP_CALL.get_or_init(|| {
        re(r"(requests\.(get|post|put|delete|patch|head|request)|urlopen)\s*\(")
    });
    call.is_match(line) && !line.contains("timeout")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_rule_matches(rules: &[RiskRule], id: &str, line: &str) -> bool {
        let rule = rules.iter().find(|r| r.id == id).expect("rule exists");
        match &rule.check {
            RuleCheck::Line(re) => re.is_match(line),
            RuleCheck::LineWhere(f) => f(line),
            _ => panic!("{id} is not a line rule"),
        }
    }

    #[test]
    fn test_js_eval_rule() {
        assert!(line_rule_matches(js_rules(), "RR-SEC-002", "eval(userInput)"));
        assert!(line_rule_matches(js_rules(), "RR-SEC-002", "const f = new Function(body)"));
        assert!(!line_rule_matches(js_rules(), "RR-SEC-002", "evaluate(x)"));
    }

    #[test]
    fn test_js_secret_rule() {
        assert!(line_rule_matches(
            js_rules(),
            "RR-SEC-005",
            r#"const apiKey = "sk_live_abcdef12345";"#
        ));
        // Short constants stay below the length heuristic.
        assert!(!line_rule_matches(
            js_rules(),
            "RR-SEC-005",
            r#"const token = "abc";"#
        ));
    }

    #[test]
    fn test_js_timeout_rule() {
        assert!(line_rule_matches(
            js_rules(),
            "RR-NET-001",
            "const res = await axios.get(url);"
        ));
        assert!(!line_rule_matches(
            js_rules(),
            "RR-NET-001",
            "const res = await axios.get(url, { timeout: 5000 });"
        ));
    }

    #[test]
    fn test_js_spawn_shell_rule_is_file_scoped() {
        let rule = js_rules().iter().find(|r| r.id == "RR-SEC-004").unwrap();
        let content = "spawn(cmd, args,\n  { cwd,\n    shell: true });\n";
        match &rule.check {
            RuleCheck::File(re) => assert!(re.is_match(content)),
            _ => panic!("spawn rule must be file-scoped"),
        }
    }

    #[test]
    fn test_js_listen_without_handler() {
        assert!(js_listen_without_error_handler("app.listen(3000);"));
        assert!(!js_listen_without_error_handler(
            "app.use((err, req, res, next) => {});\napp.listen(3000);"
        ));
    }

    #[test]
    fn test_py_shell_rules() {
        assert!(line_rule_matches(py_rules(), "RR-SEC-006", "os.system(cmd)"));
        assert!(line_rule_matches(
            py_rules(),
            "RR-SEC-007",
            "subprocess.run(cmd, shell=True)"
        ));
        assert!(!line_rule_matches(
            py_rules(),
            "RR-SEC-007",
            "subprocess.run(cmd, shell=False)"
        ));
    }

    #[test]
    fn test_py_print_rule() {
        assert!(line_rule_matches(py_rules(), "RR-OBS-002", "print(result)"));
        assert!(line_rule_matches(py_rules(), "RR-OBS-002", "    print(x)"));
        // Mid-line mentions like pprint or method calls stay clean.
        assert!(!line_rule_matches(py_rules(), "RR-OBS-002", "pprint(x)"));
        assert!(!line_rule_matches(py_rules(), "RR-OBS-002", "logger.info(sprint_name)"));
    }

    #[test]
    fn test_py_timeout_rule() {
        assert!(line_rule_matches(
            py_rules(),
            "RR-NET-002",
            "r = requests.get(url)"
        ));
        assert!(!line_rule_matches(
            py_rules(),
            "RR-NET-002",
            "r = requests.get(url, timeout=3)"
        ));
    }
}
