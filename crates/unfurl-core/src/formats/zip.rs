//! ZIP archive format handler.
//!
//! The central directory sits at the end of a zip file, so the whole archive
//! is held in memory and entries are visited in directory order. Names ending
//! in `/` are directories; every other entry, symlink-flagged ones included,
//! is written as a regular file.

use std::io;
use std::io::Cursor;

use ::zip::result::ZipError;

use crate::ExtractConfig;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Operation;
use crate::Result;
use crate::report::ProgressCallback;
use crate::types::DestDir;
use crate::types::strip_components;

use super::common::EntrySink;

/// Mode for entries whose external attributes carry no unix permissions.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// ZIP archive handler over an in-memory buffer.
pub struct ZipArchive<'a> {
    archive: ::zip::ZipArchive<Cursor<&'a [u8]>>,
}

impl<'a> ZipArchive<'a> {
    /// Parses the central directory of `data`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::InvalidArchive`] if `data` is not a
    /// readable zip archive.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        let archive = ::zip::ZipArchive::new(Cursor::new(data))
            .map_err(|e| ExtractionError::InvalidArchive(format!("zip: {e}")))?;
        Ok(Self { archive })
    }

    /// Extracts every entry beneath `dest`.
    ///
    /// Entries are decompressed one at a time. The first error halts
    /// extraction; entries already written stay on disk.
    pub fn extract(
        &mut self,
        dest: &DestDir,
        config: &ExtractConfig,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ExtractionReport> {
        let mut sink = EntrySink::new(dest, config, progress);

        for index in 0..self.archive.len() {
            let raw_name = self
                .archive
                .name_for_index(index)
                .map(str::to_owned)
                .unwrap_or_default();
            let Some(path) = strip_components(&raw_name, config.strip_components) else {
                sink.skip();
                continue;
            };

            if path.is_directory() {
                sink.directory(&path)?;
                continue;
            }

            let mut file = self.archive.by_index(index).map_err(|e| {
                ExtractionError::io(path.as_path(), Operation::OpenEntry, zip_to_io(e))
            })?;
            let mode = file.unix_mode().unwrap_or(DEFAULT_FILE_MODE);
            sink.file(&path, &mut file, mode, None)?;
        }

        Ok(sink.finish())
    }
}

fn zip_to_io(err: ZipError) -> io::Error {
    match err {
        ZipError::Io(e) => e,
        other => io::Error::new(io::ErrorKind::InvalidData, other),
    }
}
