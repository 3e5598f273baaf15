//! Owned line handed to the caller

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// The line terminator
pub const NEWLINE: u8 = b'\n';

/// One line extracted from a residual buffer.
///
/// A line is never empty. It ends with [`NEWLINE`] unless it was the last
/// line of a stream that had no trailing newline. Bytes are kept as read;
/// no encoding is assumed.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Line {
    bytes: Vec<u8>,
}

impl Line {
    /// Wrap bytes as a line, rejecting an empty sequence
    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        if bytes.is_empty() {
            None
        } else {
            Some(Self { bytes })
        }
    }

    pub(crate) fn new_unchecked(bytes: Vec<u8>) -> Self {
        debug_assert!(!bytes.is_empty());
        Self { bytes }
    }

    /// Raw bytes of the line, terminator included
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Give up ownership of the underlying bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Length in bytes, terminator included
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the line ends with a newline
    pub fn is_terminated(&self) -> bool {
        self.bytes.last() == Some(&NEWLINE)
    }

    /// Line content without the trailing newline
    pub fn content(&self) -> &[u8] {
        match self.bytes.split_last() {
            Some((&NEWLINE, rest)) => rest,
            _ => &self.bytes,
        }
    }

    /// Lossy text view of the line
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

impl AsRef<[u8]> for Line {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Line> for Vec<u8> {
    fn from(line: Line) -> Self {
        line.bytes
    }
}

impl PartialEq<[u8]> for Line {
    fn eq(&self, other: &[u8]) -> bool {
        self.bytes == other
    }
}

impl PartialEq<&[u8]> for Line {
    fn eq(&self, other: &&[u8]) -> bool {
        self.bytes == *other
    }
}

impl PartialEq<str> for Line {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for Line {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Line").field(&self.to_string_lossy()).finish()
    }
}
