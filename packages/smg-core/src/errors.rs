//! Error types for smg-core
//!
//! Structural violations (programming errors of the driving transfer
//! relation) abort the offending operation and propagate through `Result`.
//! Consistency violations are not errors; they are reported by the verifier.

use crate::config::ConfigError;
use crate::features::smg::domain::{SmgObject, SmgValue};
use thiserror::Error;

/// Main error type for graph operations
#[derive(Debug, Error)]
pub enum SmgError {
    /// Object is not a member of the graph
    #[error("Object [{0}] not in SMG")]
    UnknownObject(SmgObject),

    /// Object inserted twice
    #[error("Object [{0}] already in the SMG")]
    DuplicateObject(SmgObject),

    /// Value inserted twice
    #[error("Value [{0}] already in the SMG")]
    DuplicateValue(SmgValue),

    /// Heap object inserted twice
    #[error("Heap object already in the SMG: [{0}]")]
    DuplicateHeapObject(SmgObject),

    /// Global object inserted twice
    #[error("Global object already in the SMG: [{0}]")]
    DuplicateGlobalObject(SmgObject),

    /// Global name already bound to another object
    #[error("Global object with label [{0}] already in the SMG")]
    DuplicateGlobalName(String),

    /// Stack variable name already bound in the frame
    #[error("Stack frame for function '{function}' already contains a variable '{name}'")]
    DuplicateStackVariable { function: String, name: String },

    /// Stack variable name not bound in the frame
    #[error("No variable with name '{name}' in stack frame for function '{function}'")]
    MissingStackVariable { function: String, name: String },

    /// Declared type the sizing oracle cannot size
    #[error("Type '{0}' cannot be sized on this machine model")]
    UnsizableType(String),

    /// Objects joined field by field must have the same size
    #[error("Cannot join fields of [{0}] and [{1}]: object sizes differ")]
    JoinSizeMismatch(SmgObject, SmgObject),

    /// Stack operation without any frame
    #[error("No stack frame present")]
    NoStackFrame,

    /// Explicitly requested consistency check failed
    #[error("SMG was found inconsistent during a check: {0}")]
    Inconsistent(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for graph operations
pub type Result<T> = std::result::Result<T, SmgError>;
