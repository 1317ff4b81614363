use std::fmt::{self, Debug, Display, Formatter};
use std::rc::Rc;

use tracing::{debug, trace};

use crate::error::{
    ConstructionError, InvalidSegmentError, PathError, RootEscapeError,
};
use crate::os;

use super::node::PathNode;
use super::{EntryKind, RootSettings};

/// Attempts at a unique temp name before giving up.
const TEMP_RETRIES: u32 = 3;

/// A counted handle to one node of a shared path tree.
///
/// Every handle designates one absolute path: the chain from its node up to
/// the root. Navigation ([`enter`](Path::enter), [`exit`](Path::exit),
/// [`enter_raw`](Path::enter_raw)) returns new handles and never modifies
/// existing ones, so derived paths share their ancestor chain; cloning a
/// handle is one reference-count bump. A node is freed exactly when the
/// last handle or child referencing it is gone, never earlier.
///
/// Handles are confined to the thread that built them (the count is not
/// atomic; `Path` is not [`Send`]). Pass rendered strings across threads
/// and re-parse instead.
///
/// # Filesystem queries vs. construction
///
/// Boolean methods ([`exists`](Path::exists),
/// [`create_directory`](Path::create_directory),
/// [`delete`](Path::delete), ...) fold every failure into `false`;
/// constructors and I/O return typed [`Result`]s. See the crate docs for
/// the reasoning.
///
/// # Examples
/// ```
/// # use pathtree::path::Path;
/// # fn main() -> Result<(), pathtree::error::PathError> {
/// let logs = Path::absolute("/var/log")?;
/// let access = logs.enter("access.log")?;
///
/// assert_eq!(access.render(), "/var/log/access.log");
/// assert_eq!(access.depth(), 3);
/// assert!(logs.contains(&access));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Path {
    pub(crate) node: Rc<PathNode>,
}

impl Path {
    /// Parses an absolute path string.
    ///
    /// On single-root systems the input must begin with `/` or `\`; that
    /// first character becomes the root's rendering separator. On
    /// drive-letter systems the input must begin with `<letter>:`. The
    /// remainder is resolved segment-wise as in
    /// [`enter_raw`](Path::enter_raw).
    ///
    /// # Errors
    /// [`InvalidPathError`](crate::error::InvalidPathError) when no usable
    /// root starts the input, plus anything [`enter_raw`](Path::enter_raw)
    /// reports for the remainder.
    ///
    /// # Examples
    /// ```
    /// # use pathtree::path::Path;
    /// let path = Path::absolute("/a/b/../c").unwrap();
    /// assert_eq!(path.render(), "/a/c");
    ///
    /// assert!(Path::absolute("relative/only").is_err());
    /// ```
    pub fn absolute(raw: &str) -> Result<Path, PathError> {
        let (settings, rest) = RootSettings::parse(raw)?;
        Path::from_root(settings).enter_raw(rest)
    }

    /// The current working directory as a path.
    ///
    /// # Errors
    /// [`ConstructionError`](crate::error::ConstructionError) when the OS
    /// cannot report a working directory.
    pub fn here() -> Result<Path, PathError> {
        let raw = os::cwd().map_err(|err| ConstructionError {
            path: String::from("."),
            detail: os::error_text(err),
        })?;
        Path::absolute(&raw)
    }

    /// Resolves arbitrary user input into an absolute path: empty input is
    /// [`here`](Path::here), input carrying a root (leading separator or
    /// drive prefix) is [`absolute`](Path::absolute), and anything else is
    /// resolved relative to [`here`](Path::here).
    ///
    /// # Errors
    /// Whatever the chosen resolution reports.
    pub fn qualify(raw: &str) -> Result<Path, PathError> {
        if raw.is_empty() {
            return Path::here();
        }
        if raw.starts_with(['/', '\\']) || RootSettings::split_drive(raw).is_some() {
            return Path::absolute(raw);
        }
        Path::here()?.enter_raw(raw)
    }

    /// A handle to a bare root with the given settings.
    ///
    /// This is how foreign-flavor paths are built explicitly; native
    /// parsing goes through [`absolute`](Path::absolute).
    ///
    /// # Examples
    /// ```
    /// # use pathtree::path::{Path, RootSettings};
    /// let root = Path::from_root(RootSettings::new(None, "/"));
    /// assert!(root.is_root());
    /// assert_eq!(root.render(), "/");
    /// ```
    pub fn from_root(settings: RootSettings) -> Path {
        Path {
            node: PathNode::root(settings),
        }
    }

    /// Pushes exactly one child holding `value` as its literal segment.
    /// No re-parsing happens: separators and dots are ordinary characters
    /// here ([`enter_raw`](Path::enter_raw) is the resolving variant).
    ///
    /// # Errors
    /// [`InvalidSegmentError`] when `value` embeds a NUL byte, which no
    /// platform path can carry.
    pub fn enter(&self, value: &str) -> Result<Path, InvalidSegmentError> {
        if value.contains('\0') {
            return Err(InvalidSegmentError {
                segment: value.to_owned(),
            });
        }
        Ok(Path {
            node: PathNode::child(&self.node, value.to_owned()),
        })
    }

    /// Splits `text` on runs of separator characters (`/` and `\` both
    /// count, whatever the root renders with) and applies each piece:
    /// empty pieces and `.` are no-ops, `..` exits one level, anything else
    /// enters a child.
    ///
    /// Resolution is purely lexical; the filesystem is never consulted.
    ///
    /// # Errors
    /// [`RootEscapeError`](crate::error::RootEscapeError) when `..` lands
    /// on the root, [`InvalidSegmentError`](crate::error::InvalidSegmentError)
    /// when a segment embeds a NUL byte.
    ///
    /// # Examples
    /// ```
    /// # use pathtree::path::Path;
    /// let base = Path::absolute("/srv").unwrap();
    /// let path = base.enter_raw("app//./logs/../data").unwrap();
    /// assert_eq!(path.render(), "/srv/app/data");
    /// ```
    pub fn enter_raw(&self, text: &str) -> Result<Path, PathError> {
        let mut current = self.clone();
        for segment in text.split(['/', '\\']) {
            current = match segment {
                "" | "." => current,
                ".." => current.exit()?,
                value => current.enter(value)?,
            };
        }
        Ok(current)
    }

    /// The parent handle.
    ///
    /// # Errors
    /// [`RootEscapeError`] when called on a root.
    pub fn exit(&self) -> Result<Path, RootEscapeError> {
        match self.node.parent_node() {
            Some(parent) => Ok(Path {
                node: Rc::clone(parent),
            }),
            None => Err(RootEscapeError),
        }
    }

    /// Child handle for a name the OS itself produced (listing output);
    /// such names cannot embed NUL, so validation is skipped.
    fn os_child(&self, value: &str) -> Path {
        Path {
            node: PathNode::child(&self.node, value.to_owned()),
        }
    }

    /// The platform-native string for this path.
    ///
    /// # Examples
    /// ```
    /// # use pathtree::path::{Path, RootSettings};
    /// let dos = Path::from_root(RootSettings::new(Some("c:".into()), "\\"));
    /// let fonts = dos.enter_raw("windows/fonts").unwrap();
    /// assert_eq!(fonts.render(), "c:\\windows\\fonts");
    /// ```
    pub fn render(&self) -> String {
        self.node.render()
    }

    /// This node's own segment value; empty for a root.
    pub fn filename(&self) -> &str {
        &self.node.value
    }

    /// [`render`](Path::render) of the parent, or of this path itself when
    /// already at the root.
    pub fn directory(&self) -> String {
        match self.node.parent_node() {
            Some(parent) => parent.render(),
            None => self.render(),
        }
    }

    /// The text after the final `.` of [`filename`](Path::filename).
    /// `None` when the name has no dot or nothing follows it; a leading dot
    /// counts, so `.profile` has extension `profile`.
    pub fn extension(&self) -> Option<&str> {
        let name = self.filename();
        match name.rfind('.') {
            Some(dot) if dot + 1 < name.len() => Some(&name[dot + 1..]),
            _ => None,
        }
    }

    /// Segments between the root and this node; a root is depth 0.
    pub fn depth(&self) -> usize {
        self.node.ancestors().count() - 1
    }

    /// Whether this handle designates its tree's root.
    pub fn is_root(&self) -> bool {
        self.node.is_root()
    }

    /// Whether `other` lies at or below this path: the roots carry equal
    /// settings and this path's segments are a segment-wise prefix of
    /// `other`'s. `/a` does not contain `/ab`, and every path contains
    /// itself.
    pub fn contains(&self, other: &Path) -> bool {
        if self.node.settings() != other.node.settings() {
            return false;
        }
        let mine = self.node.segments();
        let theirs = other.node.segments();
        mine.len() <= theirs.len() && mine.iter().zip(&theirs).all(|(a, b)| a == b)
    }

    /// Whether anything exists at this path. Stat failures of any kind,
    /// including "not found", are `false`.
    pub fn exists(&self) -> bool {
        os::exists(&self.render())
    }

    /// Whether a regular file exists at this path.
    pub fn file_exists(&self) -> bool {
        os::is_file(&self.render())
    }

    /// Whether a directory exists at this path.
    pub fn directory_exists(&self) -> bool {
        os::is_dir(&self.render())
    }

    /// Enumerates the immediate children of this directory, invoking
    /// `callback` with a handle and an [`EntryKind`] per entry until the
    /// callback returns `false`. `.` and `..` are skipped. Entry order is
    /// whatever the OS reports; callers must not assume one.
    ///
    /// Returns `false` only when the directory could not be opened for
    /// listing at all.
    pub fn list(&self, mut callback: impl FnMut(Path, EntryKind) -> bool) -> bool {
        os::list_dir(&self.render(), |name, kind| {
            callback(self.os_child(name), kind)
        })
    }

    /// Creates this directory and every missing ancestor, from the root
    /// down. Directories that already exist are fine; any other failure
    /// stops the walk and returns `false`.
    pub fn create_directory(&self) -> bool {
        let mut chain: Vec<&PathNode> = self.node.ancestors().collect();
        chain.reverse();
        for node in chain.into_iter().filter(|node| !node.is_root()) {
            let rendered = node.render();
            match os::mkdir(&rendered) {
                Ok(()) => trace!(path = %rendered, "created directory"),
                Err(libc::EEXIST) => {}
                Err(_) => return false,
            }
        }
        true
    }

    /// Removes the file at this path. `false` on any failure.
    pub fn delete(&self) -> bool {
        let rendered = self.render();
        match os::unlink(&rendered) {
            Ok(()) => {
                trace!(path = %rendered, "deleted file");
                true
            }
            Err(_) => false,
        }
    }

    /// Removes the directory tree at this path without recursing: a
    /// worklist of (path, listed) pairs replaces the call stack. Listing a
    /// directory deletes its files on the spot and queues its
    /// subdirectories; once a directory has been listed it is removed in
    /// LIFO order, children before parents. The first file that fails to
    /// delete aborts the walk with `false`; a directory already gone by
    /// removal time is not an error.
    pub fn delete_directory(&self) -> bool {
        debug!(path = %self.render(), "deleting directory tree");
        let mut pending = vec![(self.clone(), false)];
        while let Some((directory, listed)) = pending.pop() {
            if listed {
                let rendered = directory.render();
                match os::rmdir(&rendered) {
                    Ok(()) => trace!(path = %rendered, "removed directory"),
                    Err(libc::ENOENT) => {}
                    Err(_) => return false,
                }
                continue;
            }
            pending.push((directory.clone(), true));
            let mut failed = false;
            directory.list(|child, kind| {
                if kind.is_directory() {
                    pending.push((child, false));
                } else {
                    failed = !child.delete();
                }
                !failed
            });
            if failed {
                return false;
            }
        }
        true
    }

    /// Makes this path the process working directory. `false` on failure.
    pub fn go_to(&self) -> bool {
        let rendered = self.render();
        match os::chdir(&rendered) {
            Ok(()) => {
                debug!(path = %rendered, "changed working directory");
                true
            }
            Err(_) => false,
        }
    }

    /// Creates a uniquely named file under `base` (default: the platform
    /// temp directory) and returns its path. The name comes from the OS's
    /// atomic create-unique primitive, retried a bounded number of times on
    /// collision.
    ///
    /// # Errors
    /// [`ConstructionError`] when the OS cannot create the entry or the
    /// retries are exhausted.
    pub fn temp_file(base: Option<&Path>) -> Result<Path, ConstructionError> {
        Path::temp(base, true)
    }

    /// Creates a uniquely named directory under `base` (default: the
    /// platform temp directory) and returns its path.
    ///
    /// # Errors
    /// [`ConstructionError`] when the OS cannot create the entry or the
    /// retries are exhausted.
    pub fn temp_dir(base: Option<&Path>) -> Result<Path, ConstructionError> {
        Path::temp(base, false)
    }

    fn temp(base: Option<&Path>, file: bool) -> Result<Path, ConstructionError> {
        let base = match base {
            Some(path) => path.render(),
            None => os::temp_dir(),
        };
        for _ in 0..TEMP_RETRIES {
            let created = match os::make_temp(&base, file) {
                Ok(created) => created,
                Err(libc::EEXIST) => continue,
                Err(err) => {
                    return Err(ConstructionError {
                        path: base,
                        detail: os::error_text(err),
                    });
                }
            };
            debug!(path = %created, file, "created temp entry");
            return Path::absolute(&created).map_err(|_| ConstructionError {
                detail: String::from("platform produced an unparseable temp path"),
                path: created,
            });
        }
        Err(ConstructionError {
            path: base,
            detail: String::from("name collisions exhausted every retry"),
        })
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl Debug for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Path").field(&self.render()).finish()
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
            || (self.node.settings() == other.node.settings()
                && self.node.segments() == other.node.segments())
    }
}

impl Eq for Path {}
