//! Shipcheck - release-readiness audit for source trees
//!
//! Walks a Python/JS/TS tree, extracts a textual import graph, detects
//! dependency cycles, scans for risky code patterns, checks project
//! hygiene, and rolls everything into a deployment-readiness score.
//!
//! The library surface is [`pipeline::analyze`] plus the models it
//! returns; the binary in `main.rs` is presentation glue only.

pub mod cli;
pub mod config;
pub mod graph;
pub mod hygiene;
pub mod locale;
pub mod models;
pub mod pipeline;
pub mod reporters;
pub mod scanner;
pub mod score;
pub mod syntax;
pub mod walker;

pub use models::{AnalysisResult, Finding, Metrics, RiskKind, Status};
pub use pipeline::{analyze, AnalyzeError, AnalyzeOptions};
