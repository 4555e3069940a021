//! Scan configuration.
//!
//! Resolved from, in order of precedence: CLI flags, an optional
//! `abspath-guard.toml`, and built-in defaults.

use crate::core::error::GuardError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "abspath-guard.toml";
pub const DEFAULT_ROOT: &str = "src";
pub const DEFAULT_SUFFIX: &str = ".php";
pub const DEFAULT_EXCLUDE: &[&str] = &["index.php"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Directory to walk.
    pub root: PathBuf,
    /// Base names skipped regardless of content. Exact, case-sensitive.
    pub exclude: Vec<String>,
    /// Base-name suffix a candidate must end with.
    pub suffix: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            exclude: DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect(),
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

impl ScanConfig {
    /// Whether a base file name is a candidate for the rule.
    pub fn is_candidate(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.suffix) && !self.exclude.iter().any(|e| e == file_name)
    }

    pub fn from_toml(content: &str) -> Result<Self, GuardError> {
        toml::from_str(content).map_err(|e| GuardError::ConfigError(e.to_string()))
    }
}

/// Load the scan config.
///
/// With an explicit path the file must exist. Otherwise `abspath-guard.toml`
/// in `dir` is used when present; no file means defaults.
pub fn load_config(dir: &Path, explicit: Option<&Path>) -> Result<ScanConfig, GuardError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(GuardError::ConfigError(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path).map_err(GuardError::IoError)?;
        return ScanConfig::from_toml(&content);
    }

    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.is_file() {
        let content = fs::read_to_string(&config_path).map_err(GuardError::IoError)?;
        return ScanConfig::from_toml(&content);
    }

    Ok(ScanConfig::default())
}
