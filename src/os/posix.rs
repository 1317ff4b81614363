//! POSIX backend: thin wrappers over libc.
//!
//! Each function converts the path at the boundary, performs one OS call,
//! and reports failure as the raw error number. Interpreting an error (or
//! folding it into a boolean) is the caller's business.

use std::ffi::{CStr, CString};
use std::io;
use std::mem::MaybeUninit;
use std::ops::Deref;

use libc::c_int;

use crate::file::OpenMode;
use crate::path::EntryKind;

pub(crate) fn err_no() -> c_int {
    // SAFETY: raw_os_error guarantees Some if constructed from last_os_error.
    unsafe { io::Error::last_os_error().raw_os_error().unwrap_unchecked() }
}

pub(crate) fn error_text(err: c_int) -> String {
    io::Error::from_raw_os_error(err).to_string()
}

/// Paths cross into libc as NUL-terminated strings; an embedded NUL can
/// never name a real file, so it maps to EINVAL.
fn to_c(path: &str) -> Result<CString, c_int> {
    CString::new(path).map_err(|_| libc::EINVAL)
}

/// An owned open file descriptor, closed on drop.
#[derive(Debug)]
pub(crate) struct Fd(c_int);

impl Deref for Fd {
    type Target = c_int;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Drop for Fd {
    fn drop(&mut self) {
        // Close errors here have no caller left to report to.
        // SAFETY: self.0 came from a successful open and is closed only here.
        unsafe {
            libc::close(self.0);
        }
    }
}

pub(crate) fn open(path: &str, mode: OpenMode) -> Result<Fd, c_int> {
    let pathname = to_c(path)?;
    let flags = match mode {
        OpenMode::Read => libc::O_RDONLY,
        OpenMode::Write => libc::O_WRONLY | libc::O_CREAT | libc::O_TRUNC,
        OpenMode::Append => libc::O_WRONLY | libc::O_CREAT | libc::O_APPEND,
        OpenMode::Modify => libc::O_RDWR,
    };
    // SAFETY: pathname is NUL-terminated and outlives the call.
    let fd = unsafe { libc::open(pathname.as_ptr(), flags, 0o666 as c_int) };
    if fd < 0 { Err(err_no()) } else { Ok(Fd(fd)) }
}

pub(crate) fn read(fd: &Fd, buf: &mut [u8]) -> Result<usize, c_int> {
    // SAFETY: buf is valid for writes of buf.len() bytes.
    let count = unsafe { libc::read(**fd, buf.as_mut_ptr().cast(), buf.len()) };
    if count < 0 { Err(err_no()) } else { Ok(count as usize) }
}

pub(crate) fn write(fd: &Fd, buf: &[u8]) -> Result<usize, c_int> {
    // SAFETY: buf is valid for reads of buf.len() bytes.
    let count = unsafe { libc::write(**fd, buf.as_ptr().cast(), buf.len()) };
    if count < 0 { Err(err_no()) } else { Ok(count as usize) }
}

pub(crate) fn seek_set(fd: &Fd, offset: libc::off_t) -> Result<u64, c_int> {
    // SAFETY: lseek touches no caller memory.
    let position = unsafe { libc::lseek(**fd, offset, libc::SEEK_SET) };
    if position < 0 { Err(err_no()) } else { Ok(position as u64) }
}

pub(crate) fn position(fd: &Fd) -> Result<u64, c_int> {
    // SAFETY: lseek touches no caller memory.
    let position = unsafe { libc::lseek(**fd, 0, libc::SEEK_CUR) };
    if position < 0 { Err(err_no()) } else { Ok(position as u64) }
}

fn stat_mode(path: &str) -> Option<libc::mode_t> {
    let pathname = to_c(path).ok()?;
    let mut status: MaybeUninit<libc::stat> = MaybeUninit::uninit();
    // SAFETY: status provides space for one stat struct, written on success.
    if unsafe { libc::stat(pathname.as_ptr(), status.as_mut_ptr()) } != 0 {
        return None;
    }
    // SAFETY: stat returned 0, so status is initialized.
    Some(unsafe { status.assume_init() }.st_mode)
}

fn lstat_mode(path: &str) -> Option<libc::mode_t> {
    let pathname = to_c(path).ok()?;
    let mut status: MaybeUninit<libc::stat> = MaybeUninit::uninit();
    // SAFETY: status provides space for one stat struct, written on success.
    if unsafe { libc::lstat(pathname.as_ptr(), status.as_mut_ptr()) } != 0 {
        return None;
    }
    // SAFETY: lstat returned 0, so status is initialized.
    Some(unsafe { status.assume_init() }.st_mode)
}

pub(crate) fn exists(path: &str) -> bool {
    stat_mode(path).is_some()
}

pub(crate) fn is_file(path: &str) -> bool {
    stat_mode(path).is_some_and(|mode| mode & libc::S_IFMT == libc::S_IFREG)
}

pub(crate) fn is_dir(path: &str) -> bool {
    stat_mode(path).is_some_and(|mode| mode & libc::S_IFMT == libc::S_IFDIR)
}

/// Classifies one directory entry by its own mode, never following
/// symbolic links: a link is a file even when its target is a directory.
pub(crate) fn entry_kind(path: &str) -> EntryKind {
    match lstat_mode(path) {
        Some(mode) if mode & libc::S_IFMT == libc::S_IFDIR => EntryKind::Directory,
        _ => EntryKind::File,
    }
}

/// Walks the entries of `path`, reporting each name and kind until `entry`
/// returns false. Returns false only if the directory never opened.
pub(crate) fn list_dir(path: &str, mut entry: impl FnMut(&str, EntryKind) -> bool) -> bool {
    let Ok(pathname) = to_c(path) else {
        return false;
    };
    // SAFETY: pathname is NUL-terminated; the stream is closed below.
    let dir = unsafe { libc::opendir(pathname.as_ptr()) };
    if dir.is_null() {
        return false;
    }
    loop {
        // SAFETY: dir is the live stream opened above.
        let current = unsafe { libc::readdir(dir) };
        if current.is_null() {
            break;
        }
        // SAFETY: readdir returned non-null, so current points at a dirent
        // whose d_name holds a NUL-terminated name.
        let (name, d_type) = unsafe {
            let name = CStr::from_ptr((*current).d_name.as_ptr());
            (name.to_string_lossy().into_owned(), (*current).d_type)
        };
        if name == "." || name == ".." {
            continue;
        }
        let kind = match d_type {
            libc::DT_DIR => EntryKind::Directory,
            libc::DT_UNKNOWN => entry_kind(&format!("{path}/{name}")),
            _ => EntryKind::File,
        };
        if !entry(&name, kind) {
            break;
        }
    }
    // SAFETY: dir has not been closed before this point.
    unsafe {
        libc::closedir(dir);
    }
    true
}

pub(crate) fn mkdir(path: &str) -> Result<(), c_int> {
    let pathname = to_c(path)?;
    // SAFETY: pathname is NUL-terminated and outlives the call.
    if unsafe { libc::mkdir(pathname.as_ptr(), 0o777) } != 0 {
        return Err(err_no());
    }
    Ok(())
}

pub(crate) fn unlink(path: &str) -> Result<(), c_int> {
    let pathname = to_c(path)?;
    // SAFETY: pathname is NUL-terminated and outlives the call.
    if unsafe { libc::unlink(pathname.as_ptr()) } != 0 {
        return Err(err_no());
    }
    Ok(())
}

pub(crate) fn rmdir(path: &str) -> Result<(), c_int> {
    let pathname = to_c(path)?;
    // SAFETY: pathname is NUL-terminated and outlives the call.
    if unsafe { libc::rmdir(pathname.as_ptr()) } != 0 {
        return Err(err_no());
    }
    Ok(())
}

pub(crate) fn chdir(path: &str) -> Result<(), c_int> {
    let pathname = to_c(path)?;
    // SAFETY: pathname is NUL-terminated and outlives the call.
    if unsafe { libc::chdir(pathname.as_ptr()) } != 0 {
        return Err(err_no());
    }
    Ok(())
}

pub(crate) fn cwd() -> Result<String, c_int> {
    let mut buf = vec![0_u8; 256];
    loop {
        // SAFETY: buf is writable for buf.len() bytes; getcwd NUL-terminates
        // on success.
        let result = unsafe { libc::getcwd(buf.as_mut_ptr().cast(), buf.len()) };
        if !result.is_null() {
            // SAFETY: getcwd succeeded, so buf holds a NUL-terminated string.
            let text = unsafe { CStr::from_ptr(buf.as_ptr().cast()) };
            return Ok(text.to_string_lossy().into_owned());
        }
        match err_no() {
            libc::ERANGE => buf.resize(buf.len() * 2, 0),
            err => return Err(err),
        }
    }
}

pub(crate) fn temp_dir() -> String {
    std::env::var("TMPDIR").unwrap_or_else(|_| String::from("/tmp"))
}

/// Creates a uniquely named file or directory under `base` and returns its
/// path. The descriptor mkstemp opens is not kept; callers reopen through a
/// file handle if they want the content.
pub(crate) fn make_temp(base: &str, file: bool) -> Result<String, c_int> {
    let template = to_c(&format!("{base}/XXXXXX"))?;
    let mut bytes = template.into_bytes_with_nul();
    if file {
        // SAFETY: bytes is a writable NUL-terminated template; mkstemp
        // rewrites the placeholder section in place.
        let fd = unsafe { libc::mkstemp(bytes.as_mut_ptr().cast()) };
        if fd < 0 {
            return Err(err_no());
        }
        // SAFETY: fd was returned open by mkstemp just above.
        unsafe {
            libc::close(fd);
        }
    } else {
        // SAFETY: as for mkstemp; mkdtemp also rewrites in place.
        if unsafe { libc::mkdtemp(bytes.as_mut_ptr().cast()) }.is_null() {
            return Err(err_no());
        }
    }
    bytes.pop();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
