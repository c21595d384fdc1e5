//! Configuration for ANQ.
//!
//! Resolution order for the process-wide grammar:
//! 1. `ANQ_MAX_DEPTH` environment variable
//! 2. Built-in defaults
//!
//! Embedders that keep settings on disk can use `Config::load_from()` and
//! compile their own grammar with `Grammar::compile()`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Environment variable overriding the nesting limit of the default grammar.
pub const ANQ_MAX_DEPTH_VAR: &str = "ANQ_MAX_DEPTH";

/// ANQ configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Maximum nesting depth accepted by the parser.
    ///
    /// Every parenthesized group, `NOT` operand and chained binary operator
    /// opens one level.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    256
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

impl Config {
    /// Create a config with an explicit nesting limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Defaults, overridden by `ANQ_MAX_DEPTH` when it holds a number.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(ANQ_MAX_DEPTH_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(depth) => config.max_depth = depth,
                Err(e) => log::warn!(
                    "ignoring {}={:?}: {}; using max_depth={}",
                    ANQ_MAX_DEPTH_VAR,
                    raw,
                    e,
                    config.max_depth
                ),
            }
        }
        config
    }

    /// Load config from a TOML file, or return defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)
                .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config as TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
