//! Error types for the Synthesizer

use thiserror::Error;

/// Errors that can occur while loading role tables or rule sets
#[derive(Error, Debug)]
pub enum SynthesizerError {
    /// A rule is malformed
    #[error("Invalid rule '{name}': {reason}")]
    InvalidRule {
        /// Rule name (may be empty)
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// The role table is malformed
    #[error("Invalid role table: {0}")]
    InvalidRoleTable(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}
