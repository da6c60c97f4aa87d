//! Run configuration file (YAML, or TOML by extension).

use std::fs;
use std::path::{Path, PathBuf};

use apicompat_core::DifferenceType;
use serde::{Deserialize, Serialize};

use crate::errors::{invalid_config, io_error, Result};

fn default_true() -> bool {
    true
}

/// Everything a `check` run reads from configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Contract surface files or directories
    #[serde(default)]
    pub contracts: Vec<PathBuf>,

    /// Implementation surface files or directories
    #[serde(default)]
    pub implementations: Vec<PathBuf>,

    #[serde(default)]
    pub baseline: Option<PathBuf>,

    #[serde(default)]
    pub remap_file: Option<PathBuf>,

    /// Report destination; stdout when unset
    #[serde(default)]
    pub out_file: Option<PathBuf>,

    #[serde(default = "default_true")]
    pub group_by_assembly: bool,

    /// Servicing mode
    #[serde(default)]
    pub mdil: bool,

    #[serde(default)]
    pub exclude_non_browsable: bool,

    /// Exact type name of an attribute whose bearers are not reported
    #[serde(default)]
    pub exclude_attribute: Option<String>,

    #[serde(default)]
    pub report_threshold: DifferenceType,

    #[serde(default)]
    pub fail_on_missing_implementation: bool,

    #[serde(default)]
    pub fail_on_version_mismatch: bool,

    #[serde(default)]
    pub ignore_design_time_facades: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            contracts: Vec::new(),
            implementations: Vec::new(),
            baseline: None,
            remap_file: None,
            out_file: None,
            group_by_assembly: true,
            mdil: false,
            exclude_non_browsable: false,
            exclude_attribute: None,
            report_threshold: DifferenceType::Incompatible,
            fail_on_missing_implementation: false,
            fail_on_version_mismatch: false,
            ignore_design_time_facades: false,
        }
    }
}

impl RunConfig {
    /// Parse YAML configuration text
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the text is not a valid configuration.
    pub fn from_yaml(text: &str, origin: &Path) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| invalid_config(origin, e.to_string()))
    }

    /// Parse TOML configuration text
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the text is not a valid configuration.
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| invalid_config(origin, e.to_string()))
    }

    /// Load a configuration file; `.toml` files are TOML, anything else YAML.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` for a missing or malformed file
    /// - `Io` when the file cannot be read
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(invalid_config(path, "configuration file not found"));
        }
        let text = fs::read_to_string(path).map_err(|e| io_error("load_config", path, e))?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&text, path)?,
            _ => Self::from_yaml(&text, path)?,
        };
        tracing::debug!(path = %path.display(), "Loaded run configuration");
        Ok(config)
    }

    /// Check that the run has something to compare.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when either side has no surface paths.
    pub fn validate(&self) -> Result<()> {
        if self.contracts.is_empty() {
            return Err(invalid_config(Path::new("<config>"), "no contract surfaces configured"));
        }
        if self.implementations.is_empty() {
            return Err(invalid_config(
                Path::new("<config>"),
                "no implementation surfaces configured",
            ));
        }
        Ok(())
    }
}
