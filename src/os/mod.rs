//! Platform filesystem primitives.
//!
//! Everything OS-specific sits behind this module: descriptor ownership,
//! open/read/write/seek, stat queries, directory walks, working-directory
//! access, and unique temp creation. One backend per platform; the rest of
//! the crate stays platform-independent.

#[cfg(unix)]
mod posix;
mod tests;

#[cfg(unix)]
pub(crate) use posix::*;
