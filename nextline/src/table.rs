//! Descriptor table: one residual buffer per tracked descriptor

use crate::descriptor::Descriptor;
use nextline_core::{ResidualBuffer, SlotState};
use std::collections::HashMap;

/// Dynamically sized map from descriptor to its residual buffer.
///
/// Empty buffers are never stored: a descriptor is tracked only while it
/// has pending bytes.
#[derive(Debug, Default)]
pub struct DescriptorTable {
    slots: HashMap<Descriptor, ResidualBuffer>,
}

impl DescriptorTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the buffer for `descriptor`, or hand out a fresh one
    pub fn take(&mut self, descriptor: Descriptor) -> ResidualBuffer {
        self.slots.remove(&descriptor).unwrap_or_default()
    }

    /// Put a buffer back; an empty buffer clears the slot instead
    pub fn store(&mut self, descriptor: Descriptor, buffer: ResidualBuffer) {
        if buffer.is_empty() {
            self.slots.remove(&descriptor);
        } else if self.slots.insert(descriptor, buffer).is_none() {
            log::debug!("tracking descriptor {descriptor}");
        }
    }

    /// Drop the slot for `descriptor`, returning its buffer if any
    pub fn remove(&mut self, descriptor: Descriptor) -> Option<ResidualBuffer> {
        self.slots.remove(&descriptor)
    }

    /// Bytes pending for `descriptor`
    pub fn pending(&self, descriptor: Descriptor) -> usize {
        self.slots.get(&descriptor).map_or(0, ResidualBuffer::len)
    }

    /// Lifecycle state of the slot for `descriptor`
    pub fn state(&self, descriptor: Descriptor) -> SlotState {
        self.slots
            .get(&descriptor)
            .map_or(SlotState::Empty, ResidualBuffer::state)
    }

    /// Number of descriptors with pending bytes
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if no descriptor has pending bytes
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Descriptors with pending bytes, in no particular order
    pub fn descriptors(&self) -> impl Iterator<Item = Descriptor> + '_ {
        self.slots.keys().copied()
    }

    /// Drop every slot
    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
