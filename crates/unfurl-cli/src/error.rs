//! Error conversion utilities for CLI.
//!
//! Converts unfurl-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) and maps failures to exit codes.

use anyhow::anyhow;
use std::fmt;
use std::process::ExitCode;
use unfurl_core::ExtractionError;
use unfurl_core::Operation;

/// The step of a run that failed. Attached as the outermost context of the
/// error returned from a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// HTTP request or response status.
    Download,
    /// Reading or unpacking the archive.
    Extract,
    /// Renaming the staging directory onto the destination.
    MoveIntoPlace,
}

impl Stage {
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Download => 1,
            Self::Extract => 3,
            Self::MoveIntoPlace => 4,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Download => "Download",
            Self::Extract => "Extract",
            Self::MoveIntoPlace => "Rename temporary",
        })
    }
}

/// Returns the process exit status for an error returned from a command.
pub fn exit_status(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<Stage>().map_or(1, |stage| stage.exit_code())
}

pub fn exit_code(err: &anyhow::Error) -> ExitCode {
    ExitCode::from(exit_status(err))
}

/// Converts `ExtractionError` to a user-friendly anyhow error tagged with
/// its [`Stage`].
pub fn convert_extraction_error(err: ExtractionError, url: &str) -> anyhow::Error {
    let stage = if err.operation() == Some(Operation::MoveIntoPlace) {
        Stage::MoveIntoPlace
    } else {
        Stage::Extract
    };

    let converted = match err {
        ExtractionError::UnknownEntryType { path, flag } => anyhow!(
            "{}: unknown type flag: {flag}\n\
             HINT: Only files, directories, links, devices and FIFOs can be extracted.",
            path.display()
        ),
        ExtractionError::InvalidArchive(reason) => anyhow!(
            "Invalid archive '{url}': {reason}\n\
             HINT: The download may be truncated, or the URL does not end in .zip."
        ),
        ExtractionError::Stream(io_err) => anyhow!(
            "Reading archive from '{url}' failed: {io_err}\n\
             HINT: The connection may have dropped, or the response is not a tar or zip archive."
        ),
        err @ ExtractionError::Io {
            operation: Operation::MoveIntoPlace,
            ..
        } => anyhow::Error::from(err)
            .context("HINT: Remove the existing destination or pass --destination."),
        err => anyhow::Error::from(err),
    };

    converted.context(stage)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_unknown_type_maps_to_extract() {
        let err = ExtractionError::UnknownEntryType {
            path: PathBuf::from("odd"),
            flag: 'Z',
        };
        let converted = convert_extraction_error(err, "https://example.com/a.tar");
        assert_eq!(converted.downcast_ref::<Stage>(), Some(&Stage::Extract));
        let msg = format!("{converted:?}");
        assert!(msg.contains("odd: unknown type flag: Z"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_move_into_place_maps_to_own_stage() {
        let err = ExtractionError::io(
            "dest",
            Operation::MoveIntoPlace,
            io::Error::new(io::ErrorKind::DirectoryNotEmpty, "not empty"),
        );
        let converted = convert_extraction_error(err, "u");
        assert_eq!(converted.downcast_ref::<Stage>(), Some(&Stage::MoveIntoPlace));
        assert_eq!(exit_status(&converted), 4);
        assert!(format!("{converted:?}").contains("moving into place"));
    }

    #[test]
    fn test_io_error_keeps_path_and_operation() {
        let err = ExtractionError::io(
            "dir/file.txt",
            Operation::CreateFile,
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let converted = convert_extraction_error(err, "u");
        assert_eq!(exit_status(&converted), 3);
        assert!(format!("{converted:?}").contains("dir/file.txt: creating new file: denied"));
    }

    #[test]
    fn test_untagged_error_exits_with_one() {
        let err = anyhow!("404 Not Found");
        assert_eq!(exit_status(&err), 1);
        assert_eq!(exit_status(&err.context(Stage::Download)), 1);
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Download.to_string(), "Download");
        assert_eq!(Stage::MoveIntoPlace.to_string(), "Rename temporary");
    }
}
