//! Per-entry bookkeeping shared between the tar and zip adapters.
//!
//! [`EntrySink`] announces each accepted entry to the progress callback,
//! forwards it to the [`EntryWriter`], and keeps the run's statistics. It is
//! an internal type; the adapters own the format-specific iteration.

use std::io;
use std::io::Read;
use std::path::Path;

use crate::ExtractConfig;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Operation;
use crate::Result;
use crate::report::ProgressCallback;
use crate::types::DestDir;
use crate::types::EntryKind;
use crate::types::StrippedPath;
use crate::writer::EntryWriter;

pub(crate) struct EntrySink<'a> {
    dest: &'a DestDir,
    writer: EntryWriter,
    report: ExtractionReport,
    progress: &'a mut dyn ProgressCallback,
}

impl<'a> EntrySink<'a> {
    pub(crate) fn new(
        dest: &'a DestDir,
        config: &ExtractConfig,
        progress: &'a mut dyn ProgressCallback,
    ) -> Self {
        Self {
            dest,
            writer: EntryWriter::new(config.permissions),
            report: ExtractionReport::new(),
            progress,
        }
    }

    /// Counts an entry that stripping removed entirely.
    pub(crate) fn skip(&mut self) {
        self.report.entries_skipped += 1;
    }

    pub(crate) fn directory(&mut self, path: &StrippedPath) -> Result<()> {
        let kind = EntryKind::Directory;
        self.progress.on_entry(path.as_path(), &kind);
        self.writer.write_directory(self.dest, path)?;
        self.report.record(&kind);
        Ok(())
    }

    /// Writes a regular file. When `expected_len` is given, a shorter
    /// content stream fails the entry instead of leaving a truncated file
    /// counted as extracted.
    pub(crate) fn file<R: Read + ?Sized>(
        &mut self,
        path: &StrippedPath,
        content: &mut R,
        mode: u32,
        expected_len: Option<u64>,
    ) -> Result<()> {
        let kind = EntryKind::File;
        self.progress.on_entry(path.as_path(), &kind);
        let written = self
            .writer
            .write_file(self.dest, path, content, mode, &mut *self.progress)?;
        self.report.bytes_written = self.report.bytes_written.saturating_add(written);
        if let Some(expected) = expected_len.filter(|&expected| written < expected) {
            return Err(ExtractionError::io(
                path.as_path(),
                Operation::WriteFile,
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("unexpected EOF after {written} of {expected} bytes"),
                ),
            ));
        }
        self.report.record(&kind);
        Ok(())
    }

    pub(crate) fn symlink(&mut self, path: &StrippedPath, target: &Path) -> Result<()> {
        let kind = EntryKind::Symlink {
            target: target.to_path_buf(),
        };
        self.progress.on_entry(path.as_path(), &kind);
        self.writer.write_symlink(self.dest, path, target)?;
        self.report.record(&kind);
        Ok(())
    }

    pub(crate) fn hardlink(&mut self, path: &StrippedPath, target: &StrippedPath) -> Result<()> {
        let kind = EntryKind::Hardlink {
            target: target.as_path().to_path_buf(),
        };
        self.progress.on_entry(path.as_path(), &kind);
        self.writer.write_hardlink(self.dest, path, target)?;
        self.report.record(&kind);
        Ok(())
    }

    pub(crate) fn finish(self) -> ExtractionReport {
        self.report
    }
}
