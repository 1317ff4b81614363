use crate::error::InvalidPathError;

/// Per-root rendering data: the optional drive-letter prefix and the
/// separator written between segments.
///
/// One instance exists per distinct root, owned by the root node and shared
/// by every path beneath it. Two paths belong to the same tree only if
/// their settings compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootSettings {
    drive: Option<String>,
    separator: String,
}

impl RootSettings {
    /// Builds settings for a root with the given prefix and separator.
    ///
    /// # Examples
    /// ```
    /// # use pathtree::path::{Path, RootSettings};
    /// let dos = RootSettings::new(Some("c:".to_string()), "\\");
    /// let root = Path::from_root(dos);
    /// assert_eq!(root.render(), "c:\\");
    /// ```
    pub fn new(drive: Option<String>, separator: impl Into<String>) -> RootSettings {
        RootSettings {
            drive,
            separator: separator.into(),
        }
    }

    /// The drive-letter prefix, if this root belongs to a multi-root system.
    pub fn drive(&self) -> Option<&str> {
        self.drive.as_deref()
    }

    /// The separator rendered between segments.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Splits a `<letter>:` prefix off the front of `raw`, if present.
    pub(crate) fn split_drive(raw: &str) -> Option<(&str, &str)> {
        let bytes = raw.as_bytes();
        if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
            Some((&raw[..2], &raw[2..]))
        } else {
            None
        }
    }

    /// Reads the native root off the front of an absolute path: the rest of
    /// the input still carries its separators and is handed on to segment
    /// parsing.
    #[cfg(unix)]
    pub(crate) fn parse(raw: &str) -> Result<(RootSettings, &str), InvalidPathError> {
        match raw.chars().next() {
            Some(first @ ('/' | '\\')) => Ok((RootSettings::new(None, first), raw)),
            _ => Err(InvalidPathError {
                path: raw.to_owned(),
            }),
        }
    }

    /// Reads the native root off the front of an absolute path: a drive
    /// prefix is required, and the rest is handed on to segment parsing.
    #[cfg(windows)]
    pub(crate) fn parse(raw: &str) -> Result<(RootSettings, &str), InvalidPathError> {
        match RootSettings::split_drive(raw) {
            Some((drive, rest)) => Ok((RootSettings::new(Some(drive.to_owned()), "\\"), rest)),
            None => Err(InvalidPathError {
                path: raw.to_owned(),
            }),
        }
    }
}
