//! Layered error types
//!
//! Per-call failures of the read loop are reported as [`ReadError`] inside a
//! [`ReadOutcome`](crate::ReadOutcome); setup failures (bad configuration,
//! unreadable config files) are [`ConfigError`].

use crate::descriptor::Descriptor;
use std::io;
use thiserror::Error;

/// Why a `read_line` call produced no line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// Descriptor outside the supported range
    #[error("invalid descriptor {descriptor}")]
    InvalidDescriptor {
        /// The rejected descriptor
        descriptor: Descriptor,
    },

    /// The underlying read failed; buffered data was discarded
    #[error("read from descriptor {descriptor} failed: {message}")]
    Io {
        /// Descriptor being read
        descriptor: Descriptor,
        /// Kind reported by the source
        kind: io::ErrorKind,
        /// Source error rendered as text
        message: String,
    },

    /// The residual buffer could not grow; buffered data was discarded
    #[error("out of memory buffering descriptor {descriptor} ({requested} bytes requested)")]
    OutOfMemory {
        /// Descriptor being read
        descriptor: Descriptor,
        /// Buffer size that could not be allocated
        requested: usize,
    },
}

impl ReadError {
    pub(crate) fn io(descriptor: Descriptor, err: &io::Error) -> Self {
        ReadError::Io {
            descriptor,
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    /// Descriptor the error refers to
    pub fn descriptor(&self) -> Descriptor {
        match self {
            ReadError::InvalidDescriptor { descriptor }
            | ReadError::Io { descriptor, .. }
            | ReadError::OutOfMemory { descriptor, .. } => *descriptor,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A setting failed validation
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Config file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Config file is not valid TOML or has the wrong shape
    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
