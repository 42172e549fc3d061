//! Optional per-project configuration
//!
//! A `shipcheck.toml` at the analyzed root can pre-set analysis options.
//! CLI flags always win over file values. A missing file yields defaults;
//! a malformed file is warned about and ignored so the audit still runs.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "shipcheck.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Locale tag for finding text ("en" or "ko").
    pub lang: Option<String>,
    /// Directory for the graph interchange JSON export.
    pub graph_dir: Option<PathBuf>,
    /// Scan worker threads; 0 means auto.
    pub workers: Option<usize>,
    /// Enable the bounded Python compile check.
    pub syntax_check: Option<bool>,
    /// Directory names pruned in addition to the built-in skip set.
    #[serde(default)]
    pub extra_skip_dirs: Vec<String>,
}

impl FileConfig {
    /// Load `shipcheck.toml` from the analyzed root, falling back to
    /// defaults when absent or unparseable.
    pub fn load(root: &Path) -> FileConfig {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.exists() {
            debug!("no {} found, using defaults", CONFIG_FILE_NAME);
            return FileConfig::default();
        }
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<FileConfig>(&content) {
                Ok(config) => {
                    debug!("loaded config from {}", path.display());
                    config
                }
                Err(err) => {
                    warn!("failed to parse {}: {}", path.display(), err);
                    FileConfig::default()
                }
            },
            Err(err) => {
                warn!("failed to read {}: {}", path.display(), err);
                FileConfig::default()
            }
        }
    }
}
