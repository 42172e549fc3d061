//! CLI command definitions and handlers

use crate::config::FileConfig;
use crate::models::Status;
use crate::pipeline::{self, AnalyzeOptions};
use crate::reporters;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

/// Parse and validate workers count (0-64, 0 = auto)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// Shipcheck - Release-readiness audit for source trees
#[derive(Parser, Debug)]
#[command(name = "shipcheck")]
#[command(
    version,
    about = "Audit a source tree for deploy blockers: risky patterns, import cycles, and missing operational basics",
    after_help = "\
Examples:
  shipcheck .                         Audit current directory
  shipcheck audit . --format json     JSON output for scripting
  shipcheck audit . --lang ko         Korean finding text
  shipcheck audit . --graph-dir out/  Export graph data for the visualizer
  shipcheck audit . --fail-below 70   Exit 1 when the score drops below 70 (CI mode)"
)]
pub struct Cli {
    /// Path to the source tree (default: current directory)
    #[arg(global = true, default_value = ".")]
    pub path: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the readiness audit (the default when no subcommand is given)
    Audit {
        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Locale for finding text: en, ko (overrides shipcheck.toml)
        #[arg(long)]
        lang: Option<String>,

        /// Directory for the graph interchange JSON export
        #[arg(long)]
        graph_dir: Option<PathBuf>,

        /// Number of scan workers (0 = auto)
        #[arg(long, value_parser = parse_workers)]
        workers: Option<usize>,

        /// Run the bounded Python compile check per file
        #[arg(long)]
        syntax_check: bool,

        /// Extra directory names to skip (repeatable)
        #[arg(long = "skip-dir")]
        skip_dirs: Vec<String>,

        /// Exit with code 1 when the score is below this value (CI mode)
        #[arg(long)]
        fail_below: Option<i32>,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Audit {
            format,
            output,
            lang,
            graph_dir,
            workers,
            syntax_check,
            skip_dirs,
            fail_below,
        }) => run_audit(
            &cli.path,
            &format,
            output,
            lang,
            graph_dir,
            workers,
            syntax_check,
            skip_dirs,
            fail_below,
        ),
        // Bare `shipcheck <path>` audits with defaults.
        None => run_audit(
            &cli.path,
            "text",
            None,
            None,
            None,
            None,
            false,
            Vec::new(),
            None,
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_audit(
    path: &PathBuf,
    format: &str,
    output: Option<PathBuf>,
    lang: Option<String>,
    graph_dir: Option<PathBuf>,
    workers: Option<usize>,
    syntax_check: bool,
    skip_dirs: Vec<String>,
    fail_below: Option<i32>,
) -> Result<()> {
    // CLI flags win over shipcheck.toml values.
    let file_config = FileConfig::load(path);
    let mut extra_skip_dirs = skip_dirs;
    extra_skip_dirs.extend(file_config.extra_skip_dirs);

    let mut options = AnalyzeOptions::default()
        .with_lang(
            lang.or(file_config.lang)
                .unwrap_or_else(|| "en".to_string()),
        )
        .with_workers(workers.or(file_config.workers).unwrap_or(0))
        .with_syntax_check(syntax_check || file_config.syntax_check.unwrap_or(false))
        .with_extra_skip_dirs(extra_skip_dirs);
    if let Some(dir) = graph_dir.or(file_config.graph_dir) {
        options = options.with_graph_dir(dir);
    }

    let result = pipeline::analyze(path, &options)
        .with_context(|| format!("audit of {} failed", path.display()))?;

    let rendered = reporters::report(&result, format)?;
    match output {
        Some(out_path) => {
            std::fs::write(&out_path, rendered)
                .with_context(|| format!("cannot write report to {}", out_path.display()))?;
            info!(path = %out_path.display(), "report written");
        }
        None => print!("{rendered}"),
    }

    if let Some(threshold) = fail_below {
        if result.score < threshold {
            info!(
                score = result.score,
                threshold, "score below threshold, failing"
            );
            std::process::exit(1);
        }
    }
    if result.status == Status::NotReady && fail_below.is_none() {
        // Informational only; exit code stays 0 unless --fail-below asked.
        info!("tree is not ready for deployment");
    }
    Ok(())
}
