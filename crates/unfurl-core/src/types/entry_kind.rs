//! Archive entry kind enumeration.

use std::fmt;
use std::path::PathBuf;

/// Kind of a logical archive entry, after format-specific decoding.
///
/// Tar character devices, block devices and FIFOs are decoded as
/// [`EntryKind::File`]; zip entries are only ever `File` or `Directory`.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use unfurl_core::EntryKind;
///
/// let link = EntryKind::Symlink {
///     target: PathBuf::from("file.txt"),
/// };
/// assert_eq!(link.to_string(), "symlink -> file.txt");
/// assert_eq!(EntryKind::Directory.to_string(), "directory");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file entry; carries a content stream.
    File,

    /// Directory entry.
    Directory,

    /// Symbolic link entry.
    ///
    /// The `target` is written verbatim, it is not resolved against the
    /// destination root.
    Symlink {
        /// The symlink target as stored in the archive.
        target: PathBuf,
    },

    /// Hard link entry.
    ///
    /// The `target` is the stripped, destination-relative path of an entry
    /// that must already be on disk.
    Hardlink {
        /// The stripped hard link target.
        target: PathBuf,
    },
}

impl EntryKind {
    /// Returns a short lowercase name for the kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
            Self::Symlink { .. } => "symlink",
            Self::Hardlink { .. } => "hardlink",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symlink { target } | Self::Hardlink { target } => {
                write!(f, "{} -> {}", self.name(), target.display())
            }
            _ => f.write_str(self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_kind_names() {
        assert_eq!(EntryKind::File.name(), "file");
        assert_eq!(EntryKind::Directory.name(), "directory");
    }

    #[test]
    fn test_entry_kind_display_includes_target() {
        let entry = EntryKind::Symlink {
            target: PathBuf::from("../target"),
        };
        assert_eq!(entry.to_string(), "symlink -> ../target");

        let entry = EntryKind::Hardlink {
            target: PathBuf::from("dir/original"),
        };
        assert_eq!(entry.to_string(), "hardlink -> dir/original");
    }

    #[test]
    fn test_entry_kind_inequality() {
        let symlink1 = EntryKind::Symlink {
            target: PathBuf::from("a"),
        };
        let symlink2 = EntryKind::Symlink {
            target: PathBuf::from("b"),
        };
        assert_ne!(symlink1, symlink2, "different targets should not be equal");
        assert_ne!(EntryKind::File, EntryKind::Directory);
    }
}
