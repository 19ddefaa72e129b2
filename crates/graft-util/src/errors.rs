use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for Graft operations outside the resolution core.
#[derive(Debug, Error, Diagnostic)]
pub enum GraftError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed workspace manifest (`Graft.toml`).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check your Graft.toml for syntax errors"))]
    Manifest { message: String },

    /// Invalid global or per-workspace configuration.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Version selection or artifact resolution failed.
    #[error("Resolution failed: {message}")]
    Resolution { message: String },

    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type GraftResult<T> = miette::Result<T>;
