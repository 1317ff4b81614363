//! A module containing [`ReadBuffer`] and the [`Fillable`] capability it
//! implements.
//!
//! The buffer sits between a producer that deposits bytes (usually a file
//! read) and a consumer that drains them, reclaiming consumed space through
//! compaction instead of allocating per read.

mod read_buffer;
mod tests;

pub use read_buffer::*;
