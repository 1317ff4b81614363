//! Strongly typed errors for path construction and file I/O.
//!
//! Boolean filesystem queries never produce these; they fold failure into
//! `false`. Only operations with a hard precondition (parse this string,
//! open this file, write these bytes) return [`Result`]s, so every type here
//! marks a failure the caller genuinely has to decide about.

use derive_more::{Display, Error, From};

/// The input to an absolute-path parse had no usable root.
///
/// On single-root systems the input must begin with a separator character;
/// on drive-letter systems it must begin with `<letter>:`.
#[derive(Debug, Display, Error)]
#[display("not an absolute path: {path:?}")]
pub struct InvalidPathError {
    /// The rejected input, unmodified.
    pub path: String,
}

/// A path segment contained an embedded NUL byte.
#[derive(Debug, Display, Error)]
#[display("path segment contains a null byte: {segment:?}")]
pub struct InvalidSegmentError {
    /// The rejected segment, unmodified.
    pub segment: String,
}

/// `..` or an exit was applied to a root node.
#[derive(Debug, Display, Error)]
#[display("cannot exit the root of a path")]
pub struct RootEscapeError;

/// A file, directory, or temp name could not be created or opened.
#[derive(Debug, Display, Error)]
#[display("failed to open {path:?}: {detail}")]
pub struct ConstructionError {
    /// The path that could not be produced.
    pub path: String,
    /// OS error text, or the precondition that failed.
    pub detail: String,
}

/// An OS I/O call failed on a handle that was already open.
#[derive(Debug, Display, Error)]
#[display("i/o error on {path:?}: {detail}")]
pub struct SystemError {
    /// The path the handle was opened from.
    pub path: String,
    /// OS error text, or the progress violation observed.
    pub detail: String,
}

/// Union of everything a parsing constructor can fail with.
///
/// [`Path::absolute`](crate::path::Path::absolute) and friends accept
/// arbitrary text, so any of the leaf failures can surface; narrower
/// operations return their exact leaf type instead.
#[derive(Debug, Display, From, Error)]
pub enum PathError {
    InvalidPath(InvalidPathError),
    InvalidSegment(InvalidSegmentError),
    RootEscape(RootEscapeError),
    Construction(ConstructionError),
}
