//! Leading-component stripping for archive entry names.

use std::fmt;
use std::path::MAIN_SEPARATOR;
use std::path::Path;

/// A non-empty, destination-relative entry path with `/` separators.
///
/// Only [`strip_components`] constructs this type, so an empty path can
/// never reach the entry writer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StrippedPath(String);

impl StrippedPath {
    /// Returns the path as a `/`-separated string.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// Returns `true` if the name ends with `/`, the zip directory marker.
    #[inline]
    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.0.ends_with('/')
    }
}

impl fmt::Display for StrippedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Removes `count` leading segments from an archive entry name.
///
/// Returns `None` when the entry should be skipped: the name has `count` or
/// fewer `/`-separated segments, or nothing is left after stripping. A
/// `count` of zero returns the name unchanged.
///
/// # Examples
///
/// ```
/// use unfurl_core::strip_components;
///
/// let stripped = strip_components("a/b/c.txt", 1).map(|p| p.to_string());
/// assert_eq!(stripped.as_deref(), Some("b/c.txt"));
///
/// assert!(strip_components("a/b/c.txt", 3).is_none());
/// assert!(strip_components("onlyfile", 1).is_none());
/// // The bare wrapper directory itself is skipped.
/// assert!(strip_components("proj-1.0/", 1).is_none());
/// ```
#[must_use]
pub fn strip_components(raw: &str, count: usize) -> Option<StrippedPath> {
    let normalized = if MAIN_SEPARATOR == '/' {
        raw.to_owned()
    } else {
        raw.replace(MAIN_SEPARATOR, "/")
    };

    let name = if count == 0 {
        normalized
    } else {
        let segments: Vec<&str> = normalized.split('/').collect();
        if segments.len() <= count {
            return None;
        }
        segments[count..].join("/")
    };

    if name.is_empty() {
        None
    } else {
        Some(StrippedPath(name))
    }
}
