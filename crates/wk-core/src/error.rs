//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `WkError` as one variant
//! where configuration problems can surface.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `wk-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum WkError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `wk-*` crates.
pub type WkResult<T> = Result<T, WkError>;
