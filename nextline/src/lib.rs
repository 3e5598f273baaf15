//! Line-at-a-time reading from file descriptors
//!
//! This crate reads text lines from already-open descriptors one call at a
//! time, using a fixed-size read chunk. Bytes read past a newline are kept
//! in a per-descriptor residual buffer, so any number of descriptors can be
//! read interleaved without losing state.
//!
//! Each call reports a [`ReadOutcome`]: a [`Line`], end-of-stream, or an
//! error. Bytes are passed through untouched; no encoding is assumed.
//!
//! # Example
//!
//! ```rust
//! use nextline::{Config, LineReader, MemoryDescriptors, ReadOutcome};
//!
//! let mut source = MemoryDescriptors::new();
//! source.insert(3, "A1\nA2\n").insert(4, "B1\nB2\n");
//!
//! let config = Config::builder().chunk_size(2).build().unwrap();
//! let mut reader = LineReader::with_config(source, config);
//!
//! assert_eq!(reader.read_line(3).into_line().unwrap(), "A1\n");
//! assert_eq!(reader.read_line(4).into_line().unwrap(), "B1\n");
//! assert_eq!(reader.read_line(3).into_line().unwrap(), "A2\n");
//! assert_eq!(reader.read_line(4).into_line().unwrap(), "B2\n");
//! assert_eq!(reader.read_line(3), ReadOutcome::EndOfStream);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod descriptor;
pub mod error;
#[cfg(unix)]
pub mod global;
pub mod outcome;
pub mod reader;
pub mod table;

// Re-export key types
pub use config::{defaults, Config, ConfigBuilder};
#[cfg(unix)]
pub use descriptor::SystemDescriptors;
pub use descriptor::{Descriptor, DescriptorSource, MemoryDescriptors, ReaderDescriptors};
pub use error::{ConfigError, ReadError, Result};
pub use outcome::ReadOutcome;
pub use reader::{LineReader, Lines};
pub use table::DescriptorTable;

// Re-export from core for convenience
pub use nextline_core::{Line, ResidualBuffer, SlotState};
