//! A module containing [`File`], an exclusively owned handle to one open
//! file.
//!
//! A handle is created from a [`Path`](crate::path::Path) in one of four
//! modes, moved around freely, and closes its descriptor when dropped.
//! Bulk reads stage through anything [`Fillable`](crate::buffer::Fillable).
//!
//! [`File`] is also re-exported at the crate root.

mod file;

pub use file::*;
