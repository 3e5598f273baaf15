//! Process-wide entry point over real OS descriptors
//!
//! Each thread owns its own [`LineReader`] over [`SystemDescriptors`] with
//! the default configuration, so leftovers persist across calls without any
//! shared mutable state. A descriptor read from two threads gets two
//! independent residual buffers.

use crate::descriptor::{Descriptor, SystemDescriptors};
use crate::outcome::ReadOutcome;
use crate::reader::LineReader;
use nextline_core::Line;
use std::cell::RefCell;

thread_local! {
    static READER: RefCell<LineReader<SystemDescriptors>> =
        RefCell::new(LineReader::new(SystemDescriptors));
}

/// Read the next line of an open OS descriptor
pub fn read_line(descriptor: Descriptor) -> ReadOutcome {
    READER.with(|reader| reader.borrow_mut().read_line(descriptor))
}

/// Read the next line, or `None` when the descriptor is exhausted or broken
pub fn get_next_line(descriptor: Descriptor) -> Option<Line> {
    READER.with(|reader| reader.borrow_mut().next_line(descriptor))
}

/// Forget this thread's buffered bytes for `descriptor`
pub fn close(descriptor: Descriptor) -> Option<usize> {
    READER.with(|reader| reader.borrow_mut().close(descriptor))
}

/// Bytes this thread has buffered for `descriptor`
pub fn pending(descriptor: Descriptor) -> usize {
    READER.with(|reader| reader.borrow().pending(descriptor))
}
