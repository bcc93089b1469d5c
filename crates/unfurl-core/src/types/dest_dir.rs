//! Destination root for one extraction run.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use super::StrippedPath;

/// The directory beneath which every extracted entry is placed.
///
/// The caller owns the directory's lifecycle. It does not have to exist
/// when extraction starts: the entry writer creates it implicitly while
/// creating entry parents.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use unfurl_core::DestDir;
/// use unfurl_core::strip_components;
///
/// let dest = DestDir::new("/tmp/out");
/// if let Some(entry) = strip_components("proj/src/main.rs", 1) {
///     assert_eq!(dest.join(&entry), Path::new("/tmp/out/src/main.rs"));
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Creates a destination root from any path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins a stripped entry path beneath this root.
    ///
    /// Root and drive-prefix components of the entry are dropped, so an
    /// absolute entry name still lands inside the root. `.` components are
    /// ignored and `..` components are kept as-is.
    #[must_use]
    pub fn join(&self, entry: &StrippedPath) -> PathBuf {
        self.join_path(entry.as_path())
    }

    /// Joins an arbitrary relative path beneath this root, with the same
    /// component rules as [`DestDir::join`].
    #[must_use]
    pub fn join_path(&self, path: &Path) -> PathBuf {
        let mut joined = self.0.clone();
        for component in path.components() {
            match component {
                Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
                Component::ParentDir | Component::Normal(_) => joined.push(component),
            }
        }
        joined
    }
}

impl From<&Path> for DestDir {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}
