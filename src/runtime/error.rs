//! Runtime error types.

use thiserror::Error;

/// Errors returned by runtime operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RuntimeError {
    #[error("Runtime not initialized: call init() before sending event '{event}'")]
    NotInitialized { event: String },
}
