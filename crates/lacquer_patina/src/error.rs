//! Error types for lacquer_patina.
//!
//! Linting itself never fails; these cover loading configuration and
//! serialized template documents.

use std::path::PathBuf;

/// Errors raised while preparing or feeding the linter
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    /// A file could not be read or written
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for `LintConfig`
    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A serialized template document could not be decoded
    #[error("invalid template document {}: {source}", .path.display())]
    Document {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Configuration names a rule that is not registered
    #[error("unknown rule `{0}`")]
    UnknownRule(String),
}

/// Result type for lacquer_patina operations.
pub type LintResultOf<T> = Result<T, LintError>;
