//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `IpsError` as one
//! variant via `#[from]`, so configuration failures raised here surface
//! unchanged at every layer.

use thiserror::Error;

/// The top-level error type for `ips-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum IpsError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `ips-*` crates.
pub type IpsResult<T> = Result<T, IpsError>;
