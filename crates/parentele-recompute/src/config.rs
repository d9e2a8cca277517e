//! Configuration for recompute runs

use crate::RecomputeError;
use serde::{Deserialize, Serialize};

/// Configuration for the Recomputer
///
/// # Examples
///
/// ```
/// use parentele_recompute::RecomputeConfig;
///
/// let config = RecomputeConfig::default();
/// assert_eq!(config.page_size, 500);
/// assert!(config.infer_implicit);
///
/// // Text and roles only, no rule engine
/// let config = RecomputeConfig::explicit_only();
/// assert!(!config.infer_implicit);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecomputeConfig {
    /// Rows fetched per page during a batch run
    /// Default: 500
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Dry-run mode: compute and log rows without deleting or writing
    /// Default: false
    #[serde(default)]
    pub dry_run: bool,

    /// Emit the baseline relations implied by declared roles
    /// Default: true
    #[serde(default = "default_true")]
    pub derive_roles: bool,

    /// Run the rule engine after explicit rows are built
    /// Default: true
    #[serde(default = "default_true")]
    pub infer_implicit: bool,
}

fn default_page_size() -> usize {
    500
}

fn default_true() -> bool {
    true
}

impl Default for RecomputeConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            dry_run: false,
            derive_roles: true,
            infer_implicit: true,
        }
    }
}

impl RecomputeConfig {
    /// Parsed phrases and role relations only
    pub fn explicit_only() -> Self {
        Self {
            infer_implicit: false,
            ..Self::default()
        }
    }

    /// Load from a TOML string; missing keys keep their defaults
    pub fn from_toml(toml_str: &str) -> Result<Self, RecomputeError> {
        let config: RecomputeConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String, RecomputeError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), RecomputeError> {
        if self.page_size == 0 {
            return Err(RecomputeError::Config(
                "page_size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
