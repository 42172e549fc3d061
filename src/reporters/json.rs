//! JSON reporter
//!
//! Outputs the full AnalysisResult as pretty-printed JSON. This is the
//! stable wire contract consumed by downstream renderers and AI-diagnosis
//! enrichment.

use crate::models::AnalysisResult;
use anyhow::Result;

/// Render the audit result as JSON
pub fn render(result: &AnalysisResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Metrics, Status};

    fn empty_result() -> AnalysisResult {
        AnalysisResult {
            score: 95,
            status: Status::Ready,
            findings: Vec::new(),
            metrics: Metrics::default(),
            graph_path: None,
            disclosure: "d".to_string(),
            cta: "c".to_string(),
        }
    }

    #[test]
    fn test_json_render_valid() {
        let json_str = render(&empty_result()).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["score"], 95);
        assert_eq!(parsed["status"], "Ready for Production");
        assert_eq!(
            parsed["findings"].as_array().expect("findings array").len(),
            0
        );
    }

    #[test]
    fn test_json_camel_case_metrics() {
        let json_str = render(&empty_result()).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert!(parsed["metrics"]["totalFiles"].is_number());
        assert!(parsed["metrics"]["jsTsFiles"].is_number());
        // graph_path absent when no graph dir was configured
        assert!(parsed.get("graphPath").is_none());
    }
}
