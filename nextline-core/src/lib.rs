//! Residual buffering and line extraction
//!
//! This crate holds the deterministic half of per-descriptor line reading:
//! a growable buffer of bytes that were read but not yet handed out, and the
//! rules for cutting the next line off its front. It performs no I/O; the
//! `nextline` crate drives it from real descriptors.
//!
//! # Example
//!
//! ```rust
//! use nextline_core::ResidualBuffer;
//!
//! let mut buffer = ResidualBuffer::new();
//! buffer.append(b"first\nsec").unwrap();
//!
//! let line = buffer.take_line().unwrap().unwrap();
//! assert_eq!(line, "first\n");
//!
//! // No newline yet: wait for more input unless the stream has ended
//! assert!(buffer.extract(false).unwrap().is_none());
//! assert_eq!(buffer.extract(true).unwrap().unwrap(), "sec");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod buffer;
pub mod error;
pub mod line;

pub use buffer::{ResidualBuffer, SlotState};
pub use error::{CoreError, Result};
pub use line::{Line, NEWLINE};
