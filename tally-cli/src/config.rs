use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use tally_core::Institution;

pub const CONFIG_FILE: &str = "tally.toml";

/// Optional per-directory settings, read from `tally.toml` next to the
/// statements:
///
/// ```toml
/// skip = ["old-draft.pdf"]
///
/// [overrides]
/// "statement-2025-03.pdf" = "hsbc"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// File names to leave out of the run
    #[serde(default)]
    pub skip: BTreeSet<String>,
    /// File name → institution id, checked before filename detection
    #[serde(default)]
    pub overrides: BTreeMap<String, Institution>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub fn config_path(input_dir: &Path) -> PathBuf {
    input_dir.join(CONFIG_FILE)
}

/// Load `tally.toml` from the input directory; defaults when absent.
pub fn load_config(input_dir: &Path) -> Result<Config, ConfigError> {
    let p = config_path(input_dir);
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).map_err(|source| ConfigError::Read {
        path: p.clone(),
        source,
    })?;
    toml::from_str(&s).map_err(|source| ConfigError::Parse { path: p, source })
}
