use tracing::{debug, trace};

use crate::buffer::{DEFAULT_CAPACITY, Fillable, ReadBuffer};
use crate::error::{ConstructionError, SystemError};
use crate::os;
use crate::path::Path;

/// How a handle is opened; fixes creation, truncation, and the write
/// position the way the classic stdio modes do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OpenMode {
    Read,
    Write,
    Append,
    Modify,
}

/// An exclusively owned handle to one open file.
///
/// There is no closed state to observe and no reopening: constructors
/// return `Err` instead of a dead handle, and dropping the handle closes
/// the descriptor. The type is deliberately not [`Clone`], so two handles
/// can never own one descriptor.
///
/// Reads remember end-of-stream: once a read reports it, further reads
/// return `false` immediately until a [`seek`](File::seek) clears the
/// condition. Genuine OS failures are [`SystemError`]s, not end-of-stream.
///
/// # Examples
/// ```no_run
/// # use pathtree::{File, Path};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let path = Path::qualify("notes.txt")?;
///
/// let mut out = File::open_write(&path)?;
/// out.write(b"draft one\n")?;
/// drop(out);
///
/// let mut back = File::open_read(&path)?;
/// assert_eq!(back.read_all()?, b"draft one\n");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct File {
    descriptor: os::Fd,
    path: String,
    eof: bool,
}

impl File {
    /// Opens for reading; the file must exist.
    ///
    /// # Errors
    /// [`ConstructionError`] carrying the rendered path when the OS open
    /// fails.
    pub fn open_read(path: &Path) -> Result<File, ConstructionError> {
        File::open(path, OpenMode::Read)
    }

    /// Opens for writing; creates the file or truncates what exists.
    ///
    /// # Errors
    /// [`ConstructionError`] carrying the rendered path when the OS open
    /// fails.
    pub fn open_write(path: &Path) -> Result<File, ConstructionError> {
        File::open(path, OpenMode::Write)
    }

    /// Opens for writing at the end; creates the file if missing and keeps
    /// what exists.
    ///
    /// # Errors
    /// [`ConstructionError`] carrying the rendered path when the OS open
    /// fails.
    pub fn open_append(path: &Path) -> Result<File, ConstructionError> {
        File::open(path, OpenMode::Append)
    }

    /// Opens an existing file for reading and writing in place, without
    /// truncation.
    ///
    /// # Errors
    /// [`ConstructionError`] carrying the rendered path when the OS open
    /// fails.
    pub fn open_modify(path: &Path) -> Result<File, ConstructionError> {
        File::open(path, OpenMode::Modify)
    }

    fn open(path: &Path, mode: OpenMode) -> Result<File, ConstructionError> {
        let rendered = path.render();
        match os::open(&rendered, mode) {
            Ok(descriptor) => {
                debug!(path = %rendered, ?mode, "opened file");
                Ok(File {
                    descriptor,
                    path: rendered,
                    eof: false,
                })
            }
            Err(err) => Err(ConstructionError {
                detail: os::error_text(err),
                path: rendered,
            }),
        }
    }

    /// The path this handle was opened from, as rendered at open time.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether a read has hit end-of-stream. Cleared by
    /// [`seek`](File::seek).
    pub fn at_eof(&self) -> bool {
        self.eof
    }

    /// Writes all of `bytes`, continuing through partial progress.
    ///
    /// # Errors
    /// [`SystemError`] when the OS reports an error or a write advances by
    /// zero bytes.
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), SystemError> {
        let mut remaining = bytes;
        while !remaining.is_empty() {
            match os::write(&self.descriptor, remaining) {
                Ok(0) => return Err(self.system_error(String::from("write made no progress"))),
                Ok(count) => remaining = &remaining[count..],
                Err(libc::EINTR) => {}
                Err(err) => return Err(self.system_error(os::error_text(err))),
            }
        }
        Ok(())
    }

    /// Fills `buffer` with up to its current length in one OS read, growing
    /// an empty buffer to the [`DEFAULT_CAPACITY`] chunk size first, then
    /// truncates it to the bytes actually read.
    ///
    /// Returns `false` without reading when the handle is already at
    /// end-of-stream, and after the read that first encounters it.
    ///
    /// # Errors
    /// [`SystemError`] on a genuine OS failure; end-of-stream is not one.
    pub fn read(&mut self, buffer: &mut Vec<u8>) -> Result<bool, SystemError> {
        if self.eof {
            return Ok(false);
        }
        if buffer.is_empty() {
            buffer.resize(DEFAULT_CAPACITY, 0);
        }
        let count = self.read_chunk(&mut buffer[..])?;
        buffer.truncate(count);
        if count == 0 {
            self.eof = true;
        }
        Ok(count > 0)
    }

    /// Reads one chunk straight into `buffer`'s free region: ensures
    /// [`DEFAULT_CAPACITY`] bytes are available, reads into
    /// `empty_start()`, and commits the actual count with `fill`. No
    /// intermediate copy.
    ///
    /// Returns `false` exactly as [`read`](File::read) does.
    ///
    /// # Errors
    /// [`SystemError`] on a genuine OS failure.
    pub fn read_into(&mut self, buffer: &mut impl Fillable) -> Result<bool, SystemError> {
        if self.eof {
            return Ok(false);
        }
        buffer.ensure(DEFAULT_CAPACITY);
        let count = self.read_chunk(buffer.empty_start())?;
        buffer.fill(count);
        if count == 0 {
            self.eof = true;
        }
        Ok(count > 0)
    }

    /// Reads from the current position to end-of-stream and returns the
    /// bytes, staging through a [`ReadBuffer`].
    ///
    /// # Errors
    /// [`SystemError`] on a genuine OS failure.
    pub fn read_all(&mut self) -> Result<Vec<u8>, SystemError> {
        let mut staging = ReadBuffer::new();
        while self.read_into(&mut staging)? {}
        Ok(staging.filled().to_vec())
    }

    fn read_chunk(&mut self, target: &mut [u8]) -> Result<usize, SystemError> {
        loop {
            match os::read(&self.descriptor, target) {
                Ok(count) => {
                    trace!(path = %self.path, count, "read chunk");
                    return Ok(count);
                }
                Err(libc::EINTR) => {}
                Err(err) => return Err(self.system_error(os::error_text(err))),
            }
        }
    }

    /// Repositions to `offset` bytes from the start of the stream (the only
    /// supported origin) and clears the end-of-stream condition.
    ///
    /// # Errors
    /// [`SystemError`] when the OS rejects the position or it exceeds the
    /// platform's file size limit.
    pub fn seek(&mut self, offset: u64) -> Result<(), SystemError> {
        let offset = libc::off_t::try_from(offset).map_err(|_| {
            self.system_error(String::from("offset exceeds the platform file size limit"))
        })?;
        match os::seek_set(&self.descriptor, offset) {
            Ok(position) => {
                trace!(path = %self.path, position, "repositioned");
                self.eof = false;
                Ok(())
            }
            Err(err) => Err(self.system_error(os::error_text(err))),
        }
    }

    /// The current position, in bytes from the start of the stream.
    ///
    /// # Errors
    /// [`SystemError`] when the descriptor does not support positioning.
    pub fn tell(&self) -> Result<u64, SystemError> {
        os::position(&self.descriptor).map_err(|err| self.system_error(os::error_text(err)))
    }

    fn system_error(&self, detail: String) -> SystemError {
        SystemError {
            path: self.path.clone(),
            detail,
        }
    }
}
