//! Engine configuration file.
//!
//! A JSON document holding startup unstable periods:
//!
//! ```json
//! { "unstable_periods": { "ALL": 10, "EMA": 25 } }
//! ```
//!
//! `ALL` is applied first, then each named family, so a family entry wins
//! over the blanket value. Every field is optional.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use ta_core::{TaError, UnstablePeriods};
use thiserror::Error;
use tracing::info;

use crate::unstable::{self, UnstableTarget};

/// Errors raised while loading an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {}", path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid config JSON.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document names something the engine does not know.
    #[error(transparent)]
    Engine(#[from] TaError),
}

/// Startup settings of the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Unstable periods keyed by family name or `ALL`.
    pub unstable_periods: BTreeMap<String, u32>,
}

impl EngineConfig {
    /// Parse a config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] for malformed JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&contents)?;
        info!(
            path = %path.display(),
            unstable_entries = config.unstable_periods.len(),
            "engine config loaded"
        );
        Ok(config)
    }

    /// `base` with this config's unstable periods applied.
    ///
    /// # Errors
    ///
    /// Returns [`TaError::UnknownFamily`] for an unknown key; `base` is not
    /// modified in that case.
    pub fn to_table(&self, base: UnstablePeriods) -> Result<UnstablePeriods, TaError> {
        let mut table = base;
        if let Some(&period) = self.unstable_periods.get("ALL") {
            UnstableTarget::All.apply_to(&mut table, period);
        }
        for (key, &period) in &self.unstable_periods {
            match key.parse::<UnstableTarget>()? {
                UnstableTarget::All => {}
                target => target.apply_to(&mut table, period),
            }
        }
        Ok(table)
    }

    /// Install this config into the process-wide unstable-period table.
    ///
    /// Families the config does not name are reset to zero.
    ///
    /// # Errors
    ///
    /// Returns [`TaError::UnknownFamily`] for an unknown key; the table is
    /// left untouched.
    pub fn apply(&self) -> Result<(), TaError> {
        unstable::replace(self.to_table(UnstablePeriods::new())?);
        Ok(())
    }
}
