//! Extract into a sibling staging directory, then rename it into place.
//!
//! A run that fails part-way leaves `<dest>.tmp` behind instead of a
//! half-populated `<dest>`.

use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::ExtractionError;
use crate::Operation;
use crate::Result;

/// Suffix appended to the destination's file name.
pub const STAGING_SUFFIX: &str = ".tmp";

/// Returns `dest` with [`STAGING_SUFFIX`] appended to its last component.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use unfurl_core::extraction::staging_path;
///
/// assert_eq!(staging_path(Path::new("out/proj-1")), Path::new("out/proj-1.tmp"));
/// ```
#[must_use]
pub fn staging_path(dest: &Path) -> PathBuf {
    let mut name = OsString::from(dest.as_os_str());
    name.push(STAGING_SUFFIX);
    PathBuf::from(name)
}

/// Runs `extract` against the staging directory and renames the staging
/// directory onto `dest` if it succeeds.
///
/// The staging directory is created first, so an archive without entries
/// still yields an empty `dest`. When `extract` fails its error is returned
/// and the staging directory is left in place.
///
/// # Errors
///
/// Returns the error from `extract`, an [`ExtractionError::Io`] with
/// [`Operation::CreateDirectory`] if the staging directory cannot be created,
/// or one with [`Operation::MoveIntoPlace`] if the rename fails (for example
/// because `dest` is a non-empty directory).
pub fn extract_staged<T, F>(dest: &Path, extract: F) -> Result<T>
where
    F: FnOnce(&Path) -> Result<T>,
{
    let staging = staging_path(dest);
    fs::create_dir_all(&staging)
        .map_err(|e| ExtractionError::io(&staging, Operation::CreateDirectory, e))?;

    let value = extract(&staging)?;

    fs::rename(&staging, dest)
        .map_err(|e| ExtractionError::io(dest, Operation::MoveIntoPlace, e))?;
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_staging_path_appends_suffix() {
        assert_eq!(staging_path(Path::new("proj")), Path::new("proj.tmp"));
        assert_eq!(
            staging_path(Path::new("/a/b/proj-1.0")),
            Path::new("/a/b/proj-1.0.tmp")
        );
    }

    #[test]
    fn test_success_moves_into_place() {
        let temp = tempfile::TempDir::new().unwrap();
        let dest = temp.path().join("proj");

        let value = extract_staged(&dest, |staging| {
            fs::write(staging.join("file.txt"), b"data").unwrap();
            Ok(42)
        })
        .unwrap();

        assert_eq!(value, 42);
        assert_eq!(fs::read(dest.join("file.txt")).unwrap(), b"data");
        assert!(!staging_path(&dest).exists());
    }

    #[test]
    fn test_empty_run_creates_destination() {
        let temp = tempfile::TempDir::new().unwrap();
        let dest = temp.path().join("empty");

        extract_staged(&dest, |_| Ok(())).unwrap();
        assert!(dest.is_dir());
    }

    #[test]
    fn test_failure_leaves_staging() {
        let temp = tempfile::TempDir::new().unwrap();
        let dest = temp.path().join("proj");

        let result: Result<()> = extract_staged(&dest, |staging| {
            fs::write(staging.join("partial"), b"").unwrap();
            Err(ExtractionError::Stream(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "truncated",
            )))
        });

        assert!(matches!(result, Err(ExtractionError::Stream(_))));
        assert!(!dest.exists());
        assert!(staging_path(&dest).join("partial").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_rename_onto_non_empty_directory_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        let dest = temp.path().join("proj");
        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("existing"), b"").unwrap();

        let err = extract_staged(&dest, |_| Ok(())).unwrap_err();
        assert_eq!(err.operation(), Some(Operation::MoveIntoPlace));
        assert_eq!(err.path(), Some(dest.as_path()));
    }
}
