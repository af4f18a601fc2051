//! Global simulation configuration.
//!
//! Tuning values live in a single `restock.toml` or `restock.json` file;
//! format is detected by extension, a conflict (both present) is an error,
//! and a missing file yields defaults.

use crate::id::Ticks;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Base name of the config file, before the format extension.
pub const CONFIG_BASENAME: &str = "restock";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Two config files with different formats exist side by side.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// SimConfig
// ---------------------------------------------------------------------------

/// Global tuning values. Fields absent from the file keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Upper bound on the quantity a single item crafting request may ask
    /// for. Fluid requests are not bounded by this value.
    pub max_craft_amount: u32,
    /// Ticks between requester reconciliation cycles.
    pub requester_interval: Ticks,
    /// Per-tick energy draw declared by a requester node.
    pub requester_energy_usage: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_craft_amount: 32,
            requester_interval: 10,
            requester_energy_usage: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load `restock.toml` or `restock.json` from `dir`.
///
/// Returns defaults when neither exists; errors when both do.
pub fn load_config(dir: &Path) -> Result<SimConfig, ConfigError> {
    let toml_path = dir.join(format!("{CONFIG_BASENAME}.toml"));
    let json_path = dir.join(format!("{CONFIG_BASENAME}.json"));

    match (toml_path.exists(), json_path.exists()) {
        (true, true) => Err(ConfigError::ConflictingFormats {
            a: toml_path,
            b: json_path,
        }),
        (true, false) => {
            let text = std::fs::read_to_string(&toml_path)?;
            toml::from_str(&text).map_err(|e| ConfigError::Parse {
                file: toml_path,
                detail: e.to_string(),
            })
        }
        (false, true) => {
            let text = std::fs::read_to_string(&json_path)?;
            serde_json::from_str(&text).map_err(|e| ConfigError::Parse {
                file: json_path,
                detail: e.to_string(),
            })
        }
        (false, false) => Ok(SimConfig::default()),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
