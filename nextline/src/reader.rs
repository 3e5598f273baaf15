//! Line reader over a descriptor namespace
//!
//! [`LineReader`] keeps one residual buffer per descriptor, so descriptors
//! can be read in any interleaving without losing partially read data.

use crate::config::Config;
use crate::descriptor::{Descriptor, DescriptorSource};
use crate::error::ReadError;
use crate::outcome::ReadOutcome;
use crate::table::DescriptorTable;
use nextline_core::{CoreError, Line, ResidualBuffer, SlotState};
use std::io;

/// Reads lines, one call at a time, from many descriptors.
///
/// Every mutating call takes `&mut self`; sharing a reader between threads
/// needs external locking. Calls for the same descriptor must be sequential
/// since each one resumes from the previous call's leftover bytes.
///
/// # Example
///
/// ```rust
/// use nextline::{LineReader, MemoryDescriptors, ReadOutcome};
///
/// let mut source = MemoryDescriptors::new();
/// source.insert(3, "hello\nworld");
///
/// let mut reader = LineReader::new(source);
/// assert_eq!(reader.read_line(3).into_line().unwrap(), "hello\n");
/// assert_eq!(reader.read_line(3).into_line().unwrap(), "world");
/// assert_eq!(reader.read_line(3), ReadOutcome::EndOfStream);
/// ```
#[derive(Debug)]
pub struct LineReader<S> {
    source: S,
    config: Config,
    table: DescriptorTable,
    /// Scratch space for one underlying read, allocated on first use
    chunk: Vec<u8>,
}

impl<S: DescriptorSource> LineReader<S> {
    /// Create a reader with the default configuration
    pub fn new(source: S) -> Self {
        Self::with_config(source, Config::default())
    }

    /// Create a reader with a custom configuration
    pub fn with_config(source: S, config: Config) -> Self {
        Self {
            source,
            config,
            table: DescriptorTable::new(),
            chunk: Vec::new(),
        }
    }

    /// Return the next line of `descriptor`.
    ///
    /// Reads chunks until the residual buffer holds a newline or the
    /// descriptor reports end-of-stream. The returned line includes its
    /// newline; the last line of a stream may lack one. Bytes read past the
    /// newline are kept for the next call.
    ///
    /// On a read or allocation failure the descriptor's buffered bytes are
    /// discarded and the next call starts fresh.
    pub fn read_line(&mut self, descriptor: Descriptor) -> ReadOutcome {
        if descriptor < 0 {
            return ReadOutcome::Error(ReadError::InvalidDescriptor { descriptor });
        }

        // The slot is detached for the duration of the call; bailing out
        // before `store` is what clears it on failure.
        let mut buffer = self.table.take(descriptor);

        let end_of_stream = match self.fill(descriptor, &mut buffer) {
            Ok(end_of_stream) => end_of_stream,
            Err(err) => {
                log::warn!("{err}; discarding {} buffered bytes", buffer.len());
                return ReadOutcome::Error(err);
            }
        };

        match buffer.extract(end_of_stream) {
            Ok(Some(line)) => {
                self.table.store(descriptor, buffer);
                ReadOutcome::Line(line)
            }
            Ok(None) => {
                log::debug!("descriptor {descriptor} reached end of stream");
                ReadOutcome::EndOfStream
            }
            Err(err) => {
                let err = out_of_memory(descriptor, err);
                log::warn!("{err}");
                ReadOutcome::Error(err)
            }
        }
    }

    /// Return the next line, or `None` once the descriptor is exhausted or
    /// broken.
    ///
    /// Errors are logged and otherwise indistinguishable from end-of-stream;
    /// use [`read_line`](Self::read_line) to tell them apart.
    pub fn next_line(&mut self, descriptor: Descriptor) -> Option<Line> {
        match self.read_line(descriptor) {
            ReadOutcome::Line(line) => Some(line),
            ReadOutcome::EndOfStream => None,
            ReadOutcome::Error(err) => {
                log::warn!("stopping descriptor {descriptor}: {err}");
                None
            }
        }
    }

    /// Iterate over the remaining lines of `descriptor`
    pub fn lines(&mut self, descriptor: Descriptor) -> Lines<'_, S> {
        Lines {
            reader: self,
            descriptor,
            done: false,
        }
    }

    /// Read chunks into `buffer` until it holds a line or the stream ends.
    ///
    /// Returns whether end-of-stream was reached.
    fn fill(
        &mut self,
        descriptor: Descriptor,
        buffer: &mut ResidualBuffer,
    ) -> Result<bool, ReadError> {
        while !buffer.has_line() {
            self.ensure_chunk(descriptor)?;
            let n = match self.source.read(descriptor, &mut self.chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(ReadError::io(descriptor, &err)),
            };
            log::trace!("read {n} bytes from descriptor {descriptor}");

            if n == 0 {
                return Ok(true);
            }
            let Some(bytes) = self.chunk.get(..n) else {
                return Err(ReadError::Io {
                    descriptor,
                    kind: io::ErrorKind::InvalidData,
                    message: format!(
                        "source reported {n} bytes for a {} byte read",
                        self.chunk.len()
                    ),
                });
            };
            buffer
                .append(bytes)
                .map_err(|err| out_of_memory(descriptor, err))?;
        }
        Ok(false)
    }

    /// Size the scratch chunk to the configured read size
    fn ensure_chunk(&mut self, descriptor: Descriptor) -> Result<(), ReadError> {
        let chunk_size = self.config.chunk_size();
        if self.chunk.len() == chunk_size {
            return Ok(());
        }
        self.chunk
            .try_reserve_exact(chunk_size.saturating_sub(self.chunk.len()))
            .map_err(|_| ReadError::OutOfMemory {
                descriptor,
                requested: chunk_size,
            })?;
        self.chunk.resize(chunk_size, 0);
        Ok(())
    }
}

impl<S> LineReader<S> {
    /// Forget the buffered bytes of `descriptor`.
    ///
    /// The descriptor itself is left open. Returns the number of discarded
    /// bytes if anything was pending.
    pub fn close(&mut self, descriptor: Descriptor) -> Option<usize> {
        let discarded = self.table.remove(descriptor).map(|b| b.len());
        if let Some(len) = discarded {
            log::debug!("closed descriptor {descriptor} with {len} pending bytes");
        }
        discarded
    }

    /// Bytes buffered for `descriptor` but not yet returned
    pub fn pending(&self, descriptor: Descriptor) -> usize {
        self.table.pending(descriptor)
    }

    /// Lifecycle state of `descriptor`'s slot
    pub fn state(&self, descriptor: Descriptor) -> SlotState {
        self.table.state(descriptor)
    }

    /// Number of descriptors with pending bytes
    pub fn tracked(&self) -> usize {
        self.table.len()
    }

    /// Reader configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Borrow the descriptor source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutably borrow the descriptor source
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Drop all buffered state and return the descriptor source
    pub fn into_source(self) -> S {
        self.source
    }
}

fn out_of_memory(descriptor: Descriptor, err: CoreError) -> ReadError {
    match err {
        CoreError::AllocationFailed { requested } => ReadError::OutOfMemory {
            descriptor,
            requested,
        },
    }
}

/// Iterator over the lines of one descriptor.
///
/// Ends at end-of-stream, or right after yielding the first error.
#[derive(Debug)]
pub struct Lines<'a, S> {
    reader: &'a mut LineReader<S>,
    descriptor: Descriptor,
    done: bool,
}

impl<S: DescriptorSource> Iterator for Lines<'_, S> {
    type Item = Result<Line, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read_line(self.descriptor) {
            ReadOutcome::Line(line) => Some(Ok(line)),
            ReadOutcome::EndOfStream => {
                self.done = true;
                None
            }
            ReadOutcome::Error(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
