//! Error types for archive extraction operations.

use std::fmt;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ExtractionError`.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// The filesystem operation that was running when an entry failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Creating a directory entry.
    CreateDirectory,
    /// Creating the parent directories of a file or link.
    CreateParentDirectory,
    /// Creating or truncating a regular file.
    CreateFile,
    /// Copying entry content into a file.
    WriteFile,
    /// Applying the entry's permission bits.
    SetPermissions,
    /// Creating a symbolic link.
    CreateSymlink,
    /// Creating a hard link.
    CreateHardlink,
    /// Opening a compressed zip entry for reading.
    OpenEntry,
    /// Renaming the staging directory onto the final destination.
    MoveIntoPlace,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::CreateDirectory => "making directory",
            Self::CreateParentDirectory => "making directory for file",
            Self::CreateFile => "creating new file",
            Self::WriteFile => "writing file",
            Self::SetPermissions => "changing file mode",
            Self::CreateSymlink => "making symbolic link",
            Self::CreateHardlink => "making hard link",
            Self::OpenEntry => "opening compressed file",
            Self::MoveIntoPlace => "moving into place",
        };
        f.write_str(text)
    }
}

/// Errors that can occur during archive extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A filesystem operation failed for one entry.
    #[error("{}: {operation}: {source}", path.display())]
    Io {
        /// Destination-relative path of the entry.
        path: PathBuf,
        /// The operation that failed.
        operation: Operation,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Reading the archive stream failed.
    #[error("reading archive: {0}")]
    Stream(#[source] io::Error),

    /// A tar entry carries a type flag outside the accepted set.
    #[error("{}: unknown type flag: {flag}", path.display())]
    UnknownEntryType {
        /// Destination-relative path of the entry.
        path: PathBuf,
        /// The raw type flag.
        flag: char,
    },

    /// Archive structure is corrupted or invalid.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),
}

impl ExtractionError {
    /// Builds an [`ExtractionError::Io`] for the given entry path.
    pub fn io(path: impl Into<PathBuf>, operation: Operation, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            operation,
            source,
        }
    }

    /// Returns `true` if the archive itself is malformed or unsupported.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use unfurl_core::ExtractionError;
    ///
    /// let err = ExtractionError::UnknownEntryType {
    ///     path: PathBuf::from("dev/null"),
    ///     flag: 'S',
    /// };
    /// assert!(err.is_format_error());
    /// assert!(!err.is_io_error());
    /// ```
    #[must_use]
    pub const fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownEntryType { .. } | Self::InvalidArchive(_)
        )
    }

    /// Returns `true` for filesystem and stream failures.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Stream(_))
    }

    /// Returns the destination-relative entry path, if the error has one.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. } | Self::UnknownEntryType { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Returns the failed operation for filesystem errors.
    #[must_use]
    pub const fn operation(&self) -> Option<Operation> {
        match self {
            Self::Io { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display_names_path_and_operation() {
        let err = ExtractionError::io(
            "dir/file.txt",
            Operation::CreateFile,
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "dir/file.txt: creating new file: denied");
        assert_eq!(err.path(), Some(Path::new("dir/file.txt")));
        assert_eq!(err.operation(), Some(Operation::CreateFile));
        assert!(err.is_io_error());
        assert!(!err.is_format_error());
    }

    #[test]
    fn test_unknown_entry_type_display() {
        let err = ExtractionError::UnknownEntryType {
            path: PathBuf::from("pax_global_header"),
            flag: 'g',
        };
        assert_eq!(err.to_string(), "pax_global_header: unknown type flag: g");
        assert!(err.is_format_error());
        assert_eq!(err.operation(), None);
    }

    #[test]
    fn test_stream_error() {
        let err = ExtractionError::Stream(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "connection closed",
        ));
        assert!(err.to_string().starts_with("reading archive"));
        assert!(err.is_io_error());
        assert_eq!(err.path(), None);
    }

    #[test]
    fn test_invalid_archive() {
        let err = ExtractionError::InvalidArchive("bad central directory".into());
        assert!(err.to_string().contains("bad central directory"));
        assert!(err.is_format_error());
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;

        let err = ExtractionError::io(
            "link",
            Operation::CreateSymlink,
            io::Error::new(io::ErrorKind::AlreadyExists, "exists"),
        );
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("exists"));
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::CreateDirectory.to_string(), "making directory");
        assert_eq!(
            Operation::CreateParentDirectory.to_string(),
            "making directory for file"
        );
        assert_eq!(Operation::SetPermissions.to_string(), "changing file mode");
        assert_eq!(Operation::CreateHardlink.to_string(), "making hard link");
        assert_eq!(Operation::OpenEntry.to_string(), "opening compressed file");
    }
}
