//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Store(#[from] parentele_store::StoreError),

    /// Recompute error
    #[error("Recompute error: {0}")]
    Recompute(#[from] parentele_recompute::RecomputeError),

    /// Lexicon error
    #[error("Lexicon error: {0}")]
    Extractor(#[from] parentele_extractor::ExtractorError),

    /// Rule set or role table error
    #[error("Rules error: {0}")]
    Synthesizer(#[from] parentele_synthesizer::SynthesizerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}
