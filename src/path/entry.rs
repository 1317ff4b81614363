use derive_more::IsVariant;

/// Classification of one directory entry reported by
/// [`Path::list`](super::Path::list).
///
/// Listing does not follow symbolic links, and anything that is not a
/// directory lists as a file; a file in this sense is anything `unlink`
/// applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum EntryKind {
    File,
    Directory,
}
