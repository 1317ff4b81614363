//! A module containing [`Path`], the counted handle to a shared path tree,
//! and its associated types.
//!
//! Paths form a tree: every handle points at one immutable node, nodes hold
//! a counted reference to their parent, and the chain terminates in a root
//! that owns the [`RootSettings`] for rendering. Deriving a path (entering
//! a child, exiting to the parent) shares the ancestor chain instead of
//! copying it, so trees deep in segments and wide in handles stay cheap.
//!
//! [`Path`] is also re-exported at the crate root.

mod entry;
mod node;
mod path;
mod settings;
mod tests;

pub use entry::*;
pub use path::*;
pub use settings::*;
