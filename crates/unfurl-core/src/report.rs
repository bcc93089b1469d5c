//! Extraction operation reporting.

use std::path::Path;
use std::time::Duration;

use crate::formats::CompressionCodec;
use crate::types::EntryKind;

/// Report of an archive extraction operation.
///
/// Contains statistics about the extraction process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Number of regular files written (including device and FIFO entries).
    pub files_extracted: usize,

    /// Number of directory entries materialized.
    pub directories_created: usize,

    /// Number of symlinks created.
    pub symlinks_created: usize,

    /// Number of hard links created.
    pub hardlinks_created: usize,

    /// Number of entries skipped because nothing remained after stripping.
    pub entries_skipped: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Compression detected on a tar stream; always `None` for zip.
    pub compression: CompressionCodec,

    /// Duration of the extraction operation.
    pub duration: Duration,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns total number of entries materialized.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted
            + self.directories_created
            + self.symlinks_created
            + self.hardlinks_created
    }

    pub(crate) fn record(&mut self, kind: &EntryKind) {
        match kind {
            EntryKind::File => self.files_extracted += 1,
            EntryKind::Directory => self.directories_created += 1,
            EntryKind::Symlink { .. } => self.symlinks_created += 1,
            EntryKind::Hardlink { .. } => self.hardlinks_created += 1,
        }
    }
}

/// Callback trait for reporting extraction progress.
///
/// Passed explicitly into every extraction call in place of a process-wide
/// verbosity switch. `on_entry` fires once for each entry that survives
/// stripping, before anything is written for it.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use unfurl_core::EntryKind;
/// use unfurl_core::ProgressCallback;
///
/// struct Announce;
///
/// impl ProgressCallback for Announce {
///     fn on_entry(&mut self, path: &Path, _kind: &EntryKind) {
///         println!(" - {}", path.display());
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_complete(&mut self) {}
/// }
/// ```
pub trait ProgressCallback {
    /// Called for every accepted entry with its destination-relative path.
    fn on_entry(&mut self, path: &Path, kind: &EntryKind);

    /// Called as file content is written.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called once after the last entry was extracted successfully.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry(&mut self, _path: &Path, _kind: &EntryKind) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_complete(&mut self) {}
}
