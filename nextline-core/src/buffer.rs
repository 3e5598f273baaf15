//! Residual buffer holding bytes read but not yet returned as a line

use alloc::vec::Vec;
use core::mem;

use crate::error::{CoreError, Result};
use crate::line::{Line, NEWLINE};

/// Lifecycle of one descriptor's residual buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// Nothing buffered
    Empty,
    /// Unconsumed bytes are waiting for the next line request
    Accumulating {
        /// Number of buffered bytes
        pending: usize,
    },
}

/// Growable buffer of unconsumed bytes for a single descriptor
#[derive(Debug, Default, Clone)]
pub struct ResidualBuffer {
    /// Storage; bytes before `start` were already handed out
    data: Vec<u8>,
    /// Offset of the first unconsumed byte in `data`
    start: usize,
    /// Offset in `data` up to which no newline was found
    scanned: usize,
}

impl ResidualBuffer {
    /// Create an empty buffer without allocating
    pub const fn new() -> Self {
        Self {
            data: Vec::new(),
            start: 0,
            scanned: 0,
        }
    }

    /// Number of buffered bytes
    pub fn len(&self) -> usize {
        self.data.len() - self.start
    }

    /// Check if nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.start == self.data.len()
    }

    /// Buffered bytes, oldest first
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[self.start..]
    }

    /// Current lifecycle state
    pub fn state(&self) -> SlotState {
        if self.is_empty() {
            SlotState::Empty
        } else {
            SlotState::Accumulating {
                pending: self.len(),
            }
        }
    }

    /// Append freshly read bytes.
    ///
    /// Growth is amortized. On allocation failure the buffer is left
    /// unchanged and the error reports the total size that was requested.
    pub fn append(&mut self, chunk: &[u8]) -> Result<()> {
        if chunk.is_empty() {
            return Ok(());
        }
        self.compact();
        self.data
            .try_reserve(chunk.len())
            .map_err(|_| CoreError::AllocationFailed {
                requested: self.data.len().saturating_add(chunk.len()),
            })?;
        self.data.extend_from_slice(chunk);
        Ok(())
    }

    /// Offset of the first newline within the buffered bytes, if any.
    ///
    /// Only bytes appended since the last unsuccessful search are scanned.
    pub fn newline_position(&mut self) -> Option<usize> {
        match self.data[self.scanned..].iter().position(|&b| b == NEWLINE) {
            Some(offset) => {
                self.scanned += offset;
                Some(self.scanned - self.start)
            }
            None => {
                self.scanned = self.data.len();
                None
            }
        }
    }

    /// Check if a complete line is buffered
    pub fn has_line(&mut self) -> bool {
        self.newline_position().is_some()
    }

    /// Remove and return the first newline-terminated line.
    ///
    /// Returns `Ok(None)` when no newline is buffered. The remainder stays
    /// in the buffer for the next call.
    pub fn take_line(&mut self) -> Result<Option<Line>> {
        let Some(pos) = self.newline_position() else {
            return Ok(None);
        };
        let len = pos + 1;
        let end = self.start + len;

        if end == self.data.len() {
            return Ok(self.take_remaining());
        }

        let mut line = Vec::new();
        line.try_reserve_exact(len)
            .map_err(|_| CoreError::AllocationFailed { requested: len })?;
        line.extend_from_slice(&self.data[self.start..end]);
        // The remainder stays in place until the next append
        self.start = end;
        self.scanned = end;

        Ok(Some(Line::new_unchecked(line)))
    }

    /// Remove and return everything buffered as one line.
    ///
    /// Used once the stream is exhausted. Returns `None` when empty.
    pub fn take_remaining(&mut self) -> Option<Line> {
        if self.is_empty() {
            self.clear();
            return None;
        }
        self.compact();
        self.scanned = 0;
        Some(Line::new_unchecked(mem::take(&mut self.data)))
    }

    /// Extract the next line given whether the stream has ended
    pub fn extract(&mut self, end_of_stream: bool) -> Result<Option<Line>> {
        match self.take_line()? {
            Some(line) => Ok(Some(line)),
            None if end_of_stream => Ok(self.take_remaining()),
            None => Ok(None),
        }
    }

    /// Drop all buffered bytes and release the allocation
    pub fn clear(&mut self) {
        self.data = Vec::new();
        self.start = 0;
        self.scanned = 0;
    }

    /// Move unconsumed bytes to the front of the storage
    fn compact(&mut self) {
        if self.start == 0 {
            return;
        }
        self.data.drain(..self.start);
        self.scanned -= self.start;
        self.start = 0;
    }
}

impl From<Vec<u8>> for ResidualBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self {
            data,
            start: 0,
            scanned: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_take_line() {
        let mut buffer = ResidualBuffer::new();
        buffer.append(b"hello\nwor").unwrap();

        let line = buffer.take_line().unwrap().unwrap();
        assert_eq!(line, "hello\n");
        assert_eq!(buffer.as_bytes(), b"wor");
        assert_eq!(buffer.state(), SlotState::Accumulating { pending: 3 });
    }

    #[test]
    fn test_no_line_without_newline() {
        let mut buffer = ResidualBuffer::new();
        buffer.append(b"partial").unwrap();

        assert!(buffer.take_line().unwrap().is_none());
        assert_eq!(buffer.len(), 7);
    }

    #[test]
    fn test_scan_resumes_after_append() {
        let mut buffer = ResidualBuffer::new();
        buffer.append(b"abc").unwrap();
        assert_eq!(buffer.newline_position(), None);
        assert_eq!(buffer.scanned, 3);

        buffer.append(b"d\nef").unwrap();
        assert_eq!(buffer.newline_position(), Some(4));
        // Repeated lookups stay put
        assert_eq!(buffer.newline_position(), Some(4));
    }

    #[test]
    fn test_exact_line_empties_buffer() {
        let mut buffer = ResidualBuffer::new();
        buffer.append(b"done\n").unwrap();

        let line = buffer.take_line().unwrap().unwrap();
        assert_eq!(line, "done\n");
        assert!(buffer.is_empty());
        assert_eq!(buffer.state(), SlotState::Empty);
    }

    #[test]
    fn test_extract_at_end_of_stream() {
        let mut buffer = ResidualBuffer::new();
        buffer.append(b"a\nlast").unwrap();

        assert_eq!(buffer.extract(true).unwrap().unwrap(), "a\n");
        assert_eq!(buffer.extract(true).unwrap().unwrap(), "last");
        assert!(buffer.extract(true).unwrap().is_none());
    }

    #[test]
    fn test_extract_waits_before_end_of_stream() {
        let mut buffer = ResidualBuffer::new();
        buffer.append(b"tail").unwrap();

        assert!(buffer.extract(false).unwrap().is_none());
        assert_eq!(buffer.len(), 4);
    }

    #[test]
    fn test_consecutive_newlines() {
        let mut buffer = ResidualBuffer::from(b"\n\nx".to_vec());

        assert_eq!(buffer.take_line().unwrap().unwrap(), "\n");
        assert_eq!(buffer.take_line().unwrap().unwrap(), "\n");
        assert!(buffer.take_line().unwrap().is_none());
        assert_eq!(buffer.take_remaining().unwrap(), "x");
    }

    #[test]
    fn test_clear_releases_allocation() {
        let mut buffer = ResidualBuffer::new();
        buffer.append(b"something").unwrap();
        buffer.clear();

        assert!(buffer.is_empty());
        assert_eq!(buffer.data.capacity(), 0);
    }

    #[test]
    fn test_take_line_leaves_remainder_in_place() {
        let mut buffer = ResidualBuffer::from(b"a\nb\nc\ntail".to_vec());

        assert_eq!(buffer.take_line().unwrap().unwrap(), "a\n");
        assert_eq!(buffer.take_line().unwrap().unwrap(), "b\n");
        assert_eq!(buffer.start, 4);
        assert_eq!(buffer.data.len(), 10);
        assert_eq!(buffer.as_bytes(), b"c\ntail");
        assert_eq!(buffer.newline_position(), Some(1));

        // Appending moves the unconsumed bytes to the front
        buffer.append(b"\n").unwrap();
        assert_eq!(buffer.start, 0);
        assert_eq!(buffer.as_bytes(), b"c\ntail\n");
        assert_eq!(buffer.take_line().unwrap().unwrap(), "c\n");
        assert_eq!(buffer.take_line().unwrap().unwrap(), "tail\n");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_take_remaining_after_consumed_prefix() {
        let mut buffer = ResidualBuffer::from(b"x\nrest".to_vec());

        assert_eq!(buffer.take_line().unwrap().unwrap(), "x\n");
        assert_eq!(buffer.state(), SlotState::Accumulating { pending: 4 });
        assert_eq!(buffer.take_remaining().unwrap(), "rest");
        assert_eq!(buffer.state(), SlotState::Empty);
        assert!(buffer.take_remaining().is_none());
    }
}
