//! Shared path trees, exclusive file handles, and a growable read buffer
//! over one thin platform seam.
//!
//! # Purpose
//! This crate models filesystem paths as trees instead of strings. Deriving
//! a path from another ([`enter`](path::Path::enter),
//! [`exit`](path::Path::exit)) shares the ancestor chain rather than
//! copying it, so a process juggling thousands of related paths pays for
//! each distinct segment once. Rendering back to a platform-native string
//! happens only at the OS boundary. Around that core sit [`File`], an
//! exclusively owned handle for byte I/O, and [`ReadBuffer`], the staging
//! buffer bulk reads fill without per-read allocation.
//!
//! # Ownership
//! Path nodes are immutable and reference-counted ([`std::rc::Rc`]): a node
//! lives exactly as long as some handle or child still reaches it, and the
//! count is not atomic, so [`Path`] is confined to the thread that built it
//! (it is not [`Send`]). Pass rendered strings between threads and re-parse
//! on the other side. [`File`] is move-only; nothing can clone an open
//! descriptor into two owners.
//!
//! # Error Handling
//! Two regimes. Boolean filesystem queries ([`exists`](path::Path::exists),
//! [`delete`](path::Path::delete),
//! [`create_directory`](path::Path::create_directory), ...) fold every
//! failure into `false`: "not there" and "could not" are ordinary answers a
//! caller checks, not exceptional states. Construction and I/O
//! ([`Path::absolute`](path::Path::absolute),
//! [`File::open_read`](File::open_read), [`File::write`](File::write), ...)
//! return strongly typed errors ([`error`] module) through [`Result`], in
//! the same style as [`std`]: structs implementing
//! [`Error`](std::error::Error), unioned into enums where an operation has
//! several failure modes. Internal contract violations (buffer cursor
//! misuse) panic through the [`panic`] module's types and are never `Err`s.
//!
//! Events along the side-effecting paths are emitted with [`tracing`]; the
//! crate installs no subscriber.
//!
//! # Examples
//! ```no_run
//! use pathtree::{File, Path};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let work = Path::qualify("build/artifacts")?;
//! work.create_directory();
//!
//! let manifest = work.enter("manifest.txt")?;
//! File::open_write(&manifest)?.write(b"artifact listing\n")?;
//!
//! work.list(|entry, kind| {
//!     println!("{kind:?}: {entry}");
//!     true
//! });
//!
//! assert!(work.contains(&manifest));
//! # Ok(())
//! # }
//! ```

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod buffer;
pub mod error;
pub mod file;
pub mod panic;
pub mod path;

pub(crate) mod os;

pub use buffer::{Fillable, ReadBuffer};
pub use file::File;
pub use path::{EntryKind, Path, RootSettings};
