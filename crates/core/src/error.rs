// Central Error Type for the Harness

use thiserror::Error;

use crate::port::ToolError;

/// Adapter-level error type
#[derive(Error, Debug)]
pub enum AdapterError {
    /// The tool's own logic failed without requesting termination.
    /// Not reinterpreted; the caller decides what to do with it.
    #[error("lint tool failed: {0}")]
    Tool(ToolError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using AdapterError
pub type Result<T> = std::result::Result<T, AdapterError>;
