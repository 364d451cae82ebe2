use thiserror::Error;

/// Top-level error type for stopgate.
#[derive(Debug, Error)]
pub enum TerminatorError {
    /// Invalid terminator configuration.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
