//! Core error types (deterministic only)

use core::fmt;

/// Residual buffer errors (no I/O, no external failures)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The allocator refused to grow the buffer
    AllocationFailed {
        /// Total capacity that was requested
        requested: usize,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::AllocationFailed { requested } => {
                write!(f, "failed to grow residual buffer to {requested} bytes")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CoreError {}

/// Result type for core operations
pub type Result<T> = core::result::Result<T, CoreError>;
