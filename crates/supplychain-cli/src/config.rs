use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "supplychain.toml";

/// Host configuration, read from a TOML file.
///
/// ```toml
/// state_path = "ledger/state.json"
/// log_level = "info"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// World state snapshot file.
    pub state_path: PathBuf,
    /// Maximum tracing level when `--verbose` is not given.
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from("supplychain-state.json"),
            log_level: "warn".into(),
        }
    }
}

impl CliConfig {
    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, `supplychain.toml` in the
    /// working directory is used if present, otherwise defaults apply.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Parsed `log_level`.
    pub fn max_level(&self) -> anyhow::Result<tracing::Level> {
        self.log_level
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid log_level {:?}", self.log_level))
    }
}
