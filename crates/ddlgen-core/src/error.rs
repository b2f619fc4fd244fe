use thiserror::Error;

/// Core error type for ddlgen.
#[derive(Debug, Error)]
pub enum Error {
    /// Writing the generated script failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The model violates structural invariants.
    #[error("invalid model: {0}")]
    InvalidModel(String),
    /// The output path cannot be used as a write target.
    #[error("invalid path: {0}")]
    InvalidPath(String),
}

/// Convenience alias for results returned by ddlgen crates.
pub type Result<T> = std::result::Result<T, Error>;
