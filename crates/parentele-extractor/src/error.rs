//! Error types for the Extractor
//!
//! Parsing itself never fails: unparseable phrases become `erreur`
//! extractions. Errors only come from loading a lexicon.

use thiserror::Error;

/// Errors that can occur while configuring the Extractor
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Lexicon content is unusable
    #[error("Invalid lexicon: {0}")]
    InvalidLexicon(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}
