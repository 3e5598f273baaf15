//! Result of a single `read_line` call

use crate::error::ReadError;
use nextline_core::Line;

/// What one `read_line` call produced
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The next line of the descriptor
    Line(Line),
    /// The descriptor is exhausted and nothing is buffered
    EndOfStream,
    /// The call failed; the descriptor's buffered bytes were discarded
    Error(ReadError),
}

impl ReadOutcome {
    /// Check if a line was produced
    pub fn is_line(&self) -> bool {
        matches!(self, ReadOutcome::Line(_))
    }

    /// Check if the descriptor is exhausted
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, ReadOutcome::EndOfStream)
    }

    /// Check if the call failed
    pub fn is_error(&self) -> bool {
        matches!(self, ReadOutcome::Error(_))
    }

    /// Borrow the line, if any
    pub fn line(&self) -> Option<&Line> {
        match self {
            ReadOutcome::Line(line) => Some(line),
            _ => None,
        }
    }

    /// Keep the line, collapsing end-of-stream and errors into `None`
    pub fn into_line(self) -> Option<Line> {
        match self {
            ReadOutcome::Line(line) => Some(line),
            _ => None,
        }
    }

    /// Convert to a `Result`, with `Ok(None)` for end-of-stream
    pub fn into_result(self) -> Result<Option<Line>, ReadError> {
        match self {
            ReadOutcome::Line(line) => Ok(Some(line)),
            ReadOutcome::EndOfStream => Ok(None),
            ReadOutcome::Error(err) => Err(err),
        }
    }
}

impl From<ReadError> for ReadOutcome {
    fn from(err: ReadError) -> Self {
        ReadOutcome::Error(err)
    }
}
