//! Configuration management for the CLI.
//!
//! Lives at `~/.parentele/config.toml`. The lexicon, rule set and role
//! table default to the built-in ones; each may be replaced by a TOML file.

use crate::error::{CliError, Result};
use parentele_extractor::{Extractor, Lexicon};
use parentele_recompute::{RecomputeConfig, Recomputer};
use parentele_synthesizer::{RoleTable, RuleSet};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database path
    #[serde(default = "default_database")]
    pub database: String,

    /// Lexicon override file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexicon: Option<PathBuf>,

    /// Rule set override file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<PathBuf>,

    /// Role table override file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<PathBuf>,

    /// Recompute settings
    #[serde(default)]
    pub recompute: RecomputeConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".parentele").join("config.toml"))
    }

    /// Load configuration from the default path or fall back to defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from a file; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.recompute.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Lexicon from the override file, or the built-in one
    pub fn load_lexicon(&self) -> Result<Lexicon> {
        match &self.lexicon {
            Some(path) => Ok(Lexicon::from_toml(&fs::read_to_string(path)?)?),
            None => Ok(Lexicon::default()),
        }
    }

    /// Rule set from the override file, or the built-in one
    pub fn load_rules(&self) -> Result<RuleSet> {
        match &self.rules {
            Some(path) => Ok(RuleSet::from_toml(&fs::read_to_string(path)?)?),
            None => Ok(RuleSet::default()),
        }
    }

    /// Role table from the override file, or the built-in one
    pub fn load_roles(&self) -> Result<RoleTable> {
        match &self.roles {
            Some(path) => Ok(RoleTable::from_toml(&fs::read_to_string(path)?)?),
            None => Ok(RoleTable::default()),
        }
    }

    /// Segmenter built from the configured lexicon
    pub fn extractor(&self) -> Result<Extractor> {
        Ok(Extractor::new(self.load_lexicon()?))
    }

    /// Recomputer built from the configured lexicon, roles, rules and
    /// recompute settings
    pub fn recomputer(&self, recompute: RecomputeConfig) -> Result<Recomputer> {
        recompute.validate()?;
        Ok(Recomputer::new(
            self.extractor()?,
            self.load_roles()?,
            self.load_rules()?,
            recompute,
        ))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            lexicon: None,
            rules: None,
            roles: None,
            recompute: RecomputeConfig::default(),
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_database() -> String {
    "parentele.db".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
