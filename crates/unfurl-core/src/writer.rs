//! Filesystem materialization of individual archive entries.
//!
//! [`EntryWriter`] knows nothing about archive formats. The tar and zip
//! adapters decode an entry, strip its name, and hand the result here. Every
//! error is annotated with the entry's destination-relative path and the
//! [`Operation`] that failed.

use std::fs;
use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use crate::ExtractionError;
use crate::Operation;
use crate::Result;
use crate::config::PermissionSupport;
use crate::copy::COPY_BUFFER_SIZE;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_progress;
use crate::report::ProgressCallback;
use crate::types::DestDir;
use crate::types::StrippedPath;

/// Mode for every directory the writer creates (`rwxr-xr-x`).
pub const DIRECTORY_MODE: u32 = 0o755;

/// Permission, setuid, setgid and sticky bits; file-type bits are dropped.
pub const MODE_MASK: u32 = 0o7777;

/// Writes directories, files, symlinks and hard links beneath a root.
#[derive(Debug)]
pub struct EntryWriter {
    permissions: PermissionSupport,
    buffer: CopyBuffer,
}

impl EntryWriter {
    /// Creates a writer for a filesystem with the given capability.
    #[must_use]
    pub fn new(permissions: PermissionSupport) -> Self {
        Self {
            permissions,
            buffer: CopyBuffer::new(),
        }
    }

    /// Creates a directory and all missing ancestors.
    ///
    /// An existing directory is not an error.
    pub fn write_directory(&self, dest: &DestDir, path: &StrippedPath) -> Result<()> {
        create_dir_all(&dest.join(path))
            .map_err(|e| ExtractionError::io(path.as_path(), Operation::CreateDirectory, e))
    }

    /// Creates or truncates a regular file, streams `content` into it and
    /// applies `mode`.
    ///
    /// A failure to apply the mode is ignored when the filesystem lacks
    /// POSIX permission bits. Returns the number of bytes written.
    pub fn write_file<R: Read + ?Sized>(
        &mut self,
        dest: &DestDir,
        path: &StrippedPath,
        content: &mut R,
        mode: u32,
        progress: &mut dyn ProgressCallback,
    ) -> Result<u64> {
        let output_path = dest.join(path);
        create_parent(&output_path, path)?;

        let file = File::create(&output_path)
            .map_err(|e| ExtractionError::io(path.as_path(), Operation::CreateFile, e))?;

        let mut writer = BufWriter::with_capacity(COPY_BUFFER_SIZE, file);
        let written = copy_with_progress(content, &mut writer, &mut self.buffer, progress)
            .and_then(|written| writer.flush().map(|()| written))
            .map_err(|e| ExtractionError::io(path.as_path(), Operation::WriteFile, e))?;
        let file = writer
            .into_inner()
            .map_err(|e| ExtractionError::io(path.as_path(), Operation::WriteFile, e.into_error()))?;

        match apply_mode(&file, mode & MODE_MASK) {
            Err(e) if self.permissions.is_posix() => {
                Err(ExtractionError::io(path.as_path(), Operation::SetPermissions, e))
            }
            _ => Ok(written),
        }
    }

    /// Creates a symbolic link pointing at `target` verbatim.
    ///
    /// The target is not checked to exist or to stay inside the root. An
    /// existing symlink at the same path is replaced; any other existing
    /// file is an error.
    pub fn write_symlink(&self, dest: &DestDir, path: &StrippedPath, target: &Path) -> Result<()> {
        let link_path = dest.join(path);
        create_parent(&link_path, path)?;

        let replace = fs::symlink_metadata(&link_path)
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false);
        if replace {
            fs::remove_file(&link_path)
                .map_err(|e| ExtractionError::io(path.as_path(), Operation::CreateSymlink, e))?;
        }

        symlink(target, &link_path)
            .map_err(|e| ExtractionError::io(path.as_path(), Operation::CreateSymlink, e))
    }

    /// Creates a hard link to an entry that is already on disk.
    ///
    /// `target` is destination-relative. Hard links are resolved in a single
    /// forward pass, so a target that appears later in the archive fails.
    pub fn write_hardlink(
        &self,
        dest: &DestDir,
        path: &StrippedPath,
        target: &StrippedPath,
    ) -> Result<()> {
        let link_path = dest.join(path);
        create_parent(&link_path, path)?;

        fs::hard_link(dest.join(target), &link_path)
            .map_err(|e| ExtractionError::io(path.as_path(), Operation::CreateHardlink, e))
    }
}

fn create_parent(output_path: &Path, entry: &StrippedPath) -> Result<()> {
    match output_path.parent() {
        Some(parent) => create_dir_all(parent).map_err(|e| {
            ExtractionError::io(entry.as_path(), Operation::CreateParentDirectory, e)
        }),
        None => Ok(()),
    }
}

fn create_dir_all(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIRECTORY_MODE);
    }
    builder.create(path)
}

#[cfg(unix)]
fn apply_mode(file: &File, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(mode))
}

// Only the owner-write bit maps onto a non-POSIX filesystem.
#[cfg(not(unix))]
fn apply_mode(file: &File, mode: u32) -> io::Result<()> {
    let mut permissions = file.metadata()?.permissions();
    permissions.set_readonly(mode & 0o200 == 0);
    file.set_permissions(permissions)
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

#[cfg(not(any(unix, windows)))]
fn symlink(_target: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symbolic links are not supported on this platform",
    ))
}
