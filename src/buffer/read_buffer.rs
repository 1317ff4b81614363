use std::fmt::{self, Debug, Formatter};

use crate::panic::{OverdrainPanic, OverfillPanic, Panic};

/// Initial capacity of a default [`ReadBuffer`], and the chunk size used for
/// buffered file reads.
pub const DEFAULT_CAPACITY: usize = 4096;

/// A reusable byte buffer with separate fill and drain cursors and
/// amortized growth.
///
/// The backing region is split into three zones:
///
/// ```text
/// [0, start)      consumed, reclaimable
/// [start, stop)   filled, waiting to be drained
/// [stop, total)   free capacity
/// ```
///
/// with `start <= stop <= total` at all times. A producer writes into
/// [`empty_start`](ReadBuffer::empty_start) and commits with
/// [`fill`](ReadBuffer::fill); a consumer inspects
/// [`filled`](ReadBuffer::filled) and releases with
/// [`consume`](ReadBuffer::consume). Growth compacts the filled zone down to
/// offset 0 first and reallocates only when reclaimed space still cannot
/// satisfy the request; filled-but-undrained bytes are never discarded. The
/// buffer never shrinks.
///
/// # Examples
/// ```
/// # use pathtree::buffer::ReadBuffer;
/// let mut buffer = ReadBuffer::new();
/// let incoming = b"segment";
///
/// buffer.ensure(incoming.len());
/// buffer.empty_start()[..incoming.len()].copy_from_slice(incoming);
/// buffer.fill(incoming.len());
///
/// assert_eq!(buffer.filled(), b"segment");
/// buffer.consume(3);
/// assert_eq!(buffer.filled(), b"ment");
/// ```
pub struct ReadBuffer {
    data: Box<[u8]>,
    start: usize,
    stop: usize,
}

impl ReadBuffer {
    /// Creates a buffer with the default capacity of [`DEFAULT_CAPACITY`]
    /// bytes.
    ///
    /// # Examples
    /// ```
    /// # use pathtree::buffer::{ReadBuffer, DEFAULT_CAPACITY};
    /// let buffer = ReadBuffer::new();
    /// assert_eq!(buffer.capacity(), DEFAULT_CAPACITY);
    /// assert_eq!(buffer.available(), DEFAULT_CAPACITY);
    /// assert!(buffer.filled().is_empty());
    /// ```
    pub fn new() -> ReadBuffer {
        ReadBuffer::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a buffer with capacity exactly equal to the provided value.
    ///
    /// # Examples
    /// ```
    /// # use pathtree::buffer::ReadBuffer;
    /// let buffer = ReadBuffer::with_capacity(64);
    /// assert_eq!(buffer.capacity(), 64);
    /// ```
    pub fn with_capacity(capacity: usize) -> ReadBuffer {
        ReadBuffer {
            data: vec![0; capacity].into_boxed_slice(),
            start: 0,
            stop: 0,
        }
    }

    /// The total size of the backing region.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Free capacity in bytes, not counting consumed space that a growth
    /// pass could reclaim.
    pub fn available(&self) -> usize {
        self.data.len() - self.stop
    }

    /// Guarantees at least `bytes` of free capacity, growing if short.
    pub fn ensure(&mut self, bytes: usize) {
        if self.available() < bytes {
            self.expand(bytes);
        }
    }

    /// Makes room for at least `bytes` of free capacity: compacts the
    /// filled zone down to offset 0, and reallocates to a larger backing
    /// region only when reclaimed space plus existing free space still
    /// falls short. After either route the consumed zone is gone:
    /// `start` is 0 and `stop` is the filled length.
    ///
    /// # Examples
    /// ```
    /// # use pathtree::buffer::ReadBuffer;
    /// let mut buffer = ReadBuffer::with_capacity(8);
    /// buffer.empty_start()[..6].copy_from_slice(b"abcdef");
    /// buffer.fill(6);
    /// buffer.consume(4);
    ///
    /// // Compaction alone reclaims the four consumed bytes.
    /// buffer.expand(5);
    /// assert_eq!(buffer.capacity(), 8);
    /// assert_eq!(buffer.filled(), b"ef");
    /// ```
    pub fn expand(&mut self, bytes: usize) {
        let filled = self.stop - self.start;
        let reclaimable = self.start + self.available();
        if bytes > reclaimable {
            let shortfall = bytes - reclaimable;
            let mut grown = vec![0; self.data.len() + 2 * shortfall].into_boxed_slice();
            grown[..filled].copy_from_slice(&self.data[self.start..self.stop]);
            self.data = grown;
        } else {
            self.data.copy_within(self.start..self.stop, 0);
        }
        self.start = 0;
        self.stop = filled;
    }

    /// The writable region covering all free capacity. Bytes written here
    /// only become visible to the consumer once committed with
    /// [`fill`](ReadBuffer::fill).
    pub fn empty_start(&mut self) -> &mut [u8] {
        &mut self.data[self.stop..]
    }

    /// Commits `bytes` just written at the head of the free region.
    ///
    /// # Panics
    /// Panics if `bytes` exceeds [`available`](ReadBuffer::available):
    /// committing bytes past the end of the backing region is a contract
    /// violation.
    pub fn fill(&mut self, bytes: usize) {
        if bytes > self.available() {
            OverfillPanic.panic();
        }
        self.stop += bytes;
    }

    /// The filled-but-undrained region.
    pub fn filled(&self) -> &[u8] {
        &self.data[self.start..self.stop]
    }

    /// Bounds-checked window into the filled region: everything from
    /// `offset` bytes past the drain cursor onward, provided at least
    /// `required` bytes are available from there. `None` otherwise, so a
    /// parser can check for a complete record without risking a short view.
    ///
    /// # Examples
    /// ```
    /// # use pathtree::buffer::ReadBuffer;
    /// let mut buffer = ReadBuffer::new();
    /// buffer.empty_start()[..4].copy_from_slice(b"head");
    /// buffer.fill(4);
    ///
    /// assert_eq!(buffer.peek(2, 1), Some(&b"ead"[..]));
    /// assert_eq!(buffer.peek(4, 1), None);
    /// ```
    pub fn peek(&self, required: usize, offset: usize) -> Option<&[u8]> {
        let remaining = (self.stop - self.start).checked_sub(offset)?;
        if remaining < required {
            return None;
        }
        Some(&self.data[self.start + offset..self.stop])
    }

    /// Releases `bytes` from the head of the filled region; the space
    /// becomes reclaimable by the next growth pass.
    ///
    /// # Panics
    /// Panics if `bytes` exceeds the filled length: draining bytes that
    /// were never filled is a contract violation.
    pub fn consume(&mut self, bytes: usize) {
        if bytes > self.stop - self.start {
            OverdrainPanic.panic();
        }
        self.start += bytes;
    }
}

impl Default for ReadBuffer {
    fn default() -> ReadBuffer {
        ReadBuffer::new()
    }
}

impl Debug for ReadBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadBuffer")
            .field("start", &self.start)
            .field("stop", &self.stop)
            .field("total", &self.data.len())
            .finish()
    }
}

/// The capability a reader fills through.
///
/// [`File::read_into`](crate::file::File::read_into) is generic over this
/// trait rather than the concrete [`ReadBuffer`], so any staging buffer that
/// can expose its free region gets the same copy-free treatment.
pub trait Fillable {
    /// Free capacity in bytes.
    fn available(&self) -> usize;

    /// Guarantees at least `bytes` of free capacity.
    fn ensure(&mut self, bytes: usize);

    /// The writable region covering the free capacity.
    fn empty_start(&mut self) -> &mut [u8];

    /// Commits `bytes` just written at the head of the free region.
    fn fill(&mut self, bytes: usize);
}

impl Fillable for ReadBuffer {
    fn available(&self) -> usize {
        ReadBuffer::available(self)
    }

    fn ensure(&mut self, bytes: usize) {
        ReadBuffer::ensure(self, bytes);
    }

    fn empty_start(&mut self) -> &mut [u8] {
        ReadBuffer::empty_start(self)
    }

    fn fill(&mut self, bytes: usize) {
        ReadBuffer::fill(self, bytes);
    }
}
