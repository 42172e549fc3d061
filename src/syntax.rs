//! Bounded Python syntax check
//!
//! Runs `python -m py_compile` against a single file with a hard
//! wall-clock timeout, polling `try_wait` and killing on expiry. Any
//! launch failure or timeout degrades to "no error found": the check is
//! best-effort and must never abort an analysis run.

use regex::Regex;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::OnceLock;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const TIMEOUT_SECS: u64 = 5;

/// A compile failure reported by the interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxIssue {
    pub line: u32,
    pub message: String,
}

fn line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"line (\d+)").unwrap())
}

fn error_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\w+Error):").unwrap())
}

/// Check one Python file, returning an issue only when the interpreter
/// exits nonzero within the timeout and stderr is parseable.
pub fn check_python_file(path: &Path) -> Option<SyntaxIssue> {
    let child = Command::new("python3")
        .args(["-m", "py_compile"])
        .arg(path)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn();

    let mut child = match child {
        Ok(child) => child,
        Err(err) => {
            debug!(error = %err, "python interpreter unavailable, skipping syntax check");
            return None;
        }
    };

    let start = Instant::now();
    let timeout = Duration::from_secs(TIMEOUT_SECS);

    // Poll for completion with small sleep intervals
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                if status.success() {
                    return None;
                }
                let stderr = child
                    .stderr
                    .take()
                    .map(|s| {
                        let reader = BufReader::new(s);
                        reader
                            .lines()
                            .map_while(Result::ok)
                            .collect::<Vec<_>>()
                            .join("\n")
                    })
                    .unwrap_or_default();
                return parse_stderr(&stderr);
            }
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    warn!(
                        file = %path.display(),
                        "py_compile timed out after {}s", TIMEOUT_SECS
                    );
                    return None;
                }
                thread::sleep(Duration::from_millis(100));
            }
            Err(err) => {
                debug!(error = %err, "failed to wait for py_compile");
                return None;
            }
        }
    }
}

/// Pull a line number and error class out of py_compile stderr.
///
/// Missing line defaults to 0; missing class falls back to a generic
/// message so a nonzero exit is never silently dropped.
fn parse_stderr(stderr: &str) -> Option<SyntaxIssue> {
    if stderr.trim().is_empty() {
        return None;
    }
    let line = line_re()
        .captures(stderr)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(0);
    let message = error_re()
        .captures(stderr)
        .and_then(|c| c.get(1))
        .map(|m| format!("{} reported by the Python compiler", m.as_str()))
        .unwrap_or_else(|| "Compile check failed".to_string());
    Some(SyntaxIssue { line, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_typical_stderr() {
        let stderr = concat!(
            "  File \"app.py\", line 14\n",
            "    def broken(:\n",
            "               ^\n",
            "SyntaxError: invalid syntax\n",
        );
        let issue = parse_stderr(stderr).unwrap();
        assert_eq!(issue.line, 14);
        assert!(issue.message.starts_with("SyntaxError"));
    }

    #[test]
    fn test_parse_indentation_error() {
        let stderr = "IndentationError: unexpected indent (util.py, line 3)";
        let issue = parse_stderr(stderr).unwrap();
        assert_eq!(issue.line, 3);
        assert!(issue.message.starts_with("IndentationError"));
    }

    #[test]
    fn test_parse_unrecognized_stderr() {
        let issue = parse_stderr("something exploded").unwrap();
        assert_eq!(issue.line, 0);
        assert_eq!(issue.message, "Compile check failed");
    }

    #[test]
    fn test_empty_stderr_is_clean() {
        assert!(parse_stderr("").is_none());
        assert!(parse_stderr("   \n").is_none());
    }
}
