//! Simulator configuration with TOML file support.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use distributor_host::GasSchedule;
use distributor_types::NATIVE_DECIMALS;
use distributor_utils::LogFormat;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config cannot be rendered as TOML: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Configuration for the simulator.
///
/// Every field is optional in the file. CLI flags and `DISTRIBUTOR_*`
/// environment variables override what the file says.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributorConfig {
    /// Decimals used to scale token amounts in batch files.
    #[serde(default = "default_decimals")]
    pub decimals: u8,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Costs and default budget of the simulated host.
    #[serde(default)]
    pub gas: GasSchedule,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_decimals() -> u8 {
    NATIVE_DECIMALS
}

fn default_log_level() -> String {
    "warn".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl DistributorConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for DistributorConfig {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            gas: GasSchedule::default(),
        }
    }
}
