//! Descriptor sources
//!
//! A [`DescriptorSource`] performs the underlying reads for a namespace of
//! small integer descriptors. [`SystemDescriptors`] reads real OS
//! descriptors; [`MemoryDescriptors`] and [`ReaderDescriptors`] serve
//! descriptors from memory or from arbitrary readers.

use std::collections::HashMap;
use std::io::{self, Read};

/// Descriptor number, same width as a unix raw descriptor
pub type Descriptor = i32;

/// Performs one underlying read for a descriptor
pub trait DescriptorSource {
    /// Read up to `buf.len()` bytes from `descriptor`.
    ///
    /// Returns the number of bytes read; `0` means end-of-stream.
    fn read(&mut self, descriptor: Descriptor, buf: &mut [u8]) -> io::Result<usize>;
}

impl<S: DescriptorSource + ?Sized> DescriptorSource for &mut S {
    fn read(&mut self, descriptor: Descriptor, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read(descriptor, buf)
    }
}

impl<S: DescriptorSource + ?Sized> DescriptorSource for Box<S> {
    fn read(&mut self, descriptor: Descriptor, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read(descriptor, buf)
    }
}

fn bad_descriptor(descriptor: Descriptor) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("bad file descriptor {descriptor}"),
    )
}

/// Real OS descriptors, read with `read(2)`.
///
/// Descriptors are never opened or closed here; the caller owns them.
#[cfg(unix)]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDescriptors;

#[cfg(unix)]
impl DescriptorSource for SystemDescriptors {
    fn read(&mut self, descriptor: Descriptor, buf: &mut [u8]) -> io::Result<usize> {
        // SAFETY: `buf` is valid for writes of `buf.len()` bytes for the whole call.
        let n = unsafe { libc::read(descriptor, buf.as_mut_ptr().cast(), buf.len()) };
        // Negative means failure, with the cause in errno
        usize::try_from(n).map_err(|_| io::Error::last_os_error())
    }
}

#[derive(Debug, Default)]
struct MemoryFile {
    data: Vec<u8>,
    pos: usize,
    max_read: Option<usize>,
    fail_at: Option<usize>,
}

/// In-memory descriptor namespace.
///
/// Each descriptor serves the bytes registered for it. Reads can be capped
/// to simulate short reads, content can be appended after end-of-stream was
/// seen, and a one-shot read failure can be planted at a byte offset.
#[derive(Debug, Default)]
pub struct MemoryDescriptors {
    files: HashMap<Descriptor, MemoryFile>,
    read_calls: usize,
}

impl MemoryDescriptors {
    /// Create an empty namespace
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `data` under `descriptor`, replacing any previous content
    pub fn insert(&mut self, descriptor: Descriptor, data: impl Into<Vec<u8>>) -> &mut Self {
        self.files.insert(
            descriptor,
            MemoryFile {
                data: data.into(),
                ..MemoryFile::default()
            },
        );
        self
    }

    /// Make more bytes available on `descriptor`.
    ///
    /// Unknown descriptors are registered on the fly.
    pub fn append(&mut self, descriptor: Descriptor, data: &[u8]) -> &mut Self {
        self.files
            .entry(descriptor)
            .or_default()
            .data
            .extend_from_slice(data);
        self
    }

    /// Deliver at most `max` bytes per read on `descriptor`
    pub fn limit_reads(&mut self, descriptor: Descriptor, max: usize) -> &mut Self {
        if let Some(file) = self.files.get_mut(&descriptor) {
            file.max_read = Some(max);
        }
        self
    }

    /// Fail the first read that starts at or past `offset` on `descriptor`
    pub fn fail_at(&mut self, descriptor: Descriptor, offset: usize) -> &mut Self {
        if let Some(file) = self.files.get_mut(&descriptor) {
            file.fail_at = Some(offset);
        }
        self
    }

    /// Forget `descriptor`; later reads fail as on a closed descriptor
    pub fn remove(&mut self, descriptor: Descriptor) -> bool {
        self.files.remove(&descriptor).is_some()
    }

    /// Bytes of `descriptor` already delivered by reads
    pub fn position(&self, descriptor: Descriptor) -> Option<usize> {
        self.files.get(&descriptor).map(|f| f.pos)
    }

    /// Total number of underlying reads served, failed ones included
    pub fn read_calls(&self) -> usize {
        self.read_calls
    }
}

impl DescriptorSource for MemoryDescriptors {
    fn read(&mut self, descriptor: Descriptor, buf: &mut [u8]) -> io::Result<usize> {
        self.read_calls += 1;
        let file = self
            .files
            .get_mut(&descriptor)
            .ok_or_else(|| bad_descriptor(descriptor))?;

        let mut limit = buf.len();
        if let Some(max) = file.max_read {
            limit = limit.min(max);
        }
        if let Some(offset) = file.fail_at {
            if file.pos >= offset {
                file.fail_at = None;
                return Err(io::Error::other(format!(
                    "injected failure on descriptor {descriptor} at offset {offset}"
                )));
            }
            limit = limit.min(offset - file.pos);
        }

        let remaining = &file.data[file.pos..];
        let n = remaining.len().min(limit);
        buf[..n].copy_from_slice(&remaining[..n]);
        file.pos += n;
        Ok(n)
    }
}

/// Descriptor namespace backed by arbitrary readers
#[derive(Debug)]
pub struct ReaderDescriptors<R> {
    readers: HashMap<Descriptor, R>,
}

impl<R> Default for ReaderDescriptors<R> {
    fn default() -> Self {
        Self {
            readers: HashMap::new(),
        }
    }
}

impl<R: Read> ReaderDescriptors<R> {
    /// Create an empty namespace
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `reader` under `descriptor`, returning any reader it replaces
    pub fn insert(&mut self, descriptor: Descriptor, reader: R) -> Option<R> {
        self.readers.insert(descriptor, reader)
    }

    /// Take back the reader registered under `descriptor`
    pub fn remove(&mut self, descriptor: Descriptor) -> Option<R> {
        self.readers.remove(&descriptor)
    }
}

impl<R: Read> DescriptorSource for ReaderDescriptors<R> {
    fn read(&mut self, descriptor: Descriptor, buf: &mut [u8]) -> io::Result<usize> {
        self.readers
            .get_mut(&descriptor)
            .ok_or_else(|| bad_descriptor(descriptor))?
            .read(buf)
    }
}
