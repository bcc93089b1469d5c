//! Tar archive format handler.
//!
//! Entries are consumed in stream order, so a tar archive can be extracted
//! while it is still being downloaded. Gzip framing is detected on the fly.

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
use crate::types::StrippedPath;
use crate::types::strip_components;

use super::common::EntrySink;
use super::compression::CompressionCodec;
use super::compression::TarStream;

const REGULAR: u8 = b'0';
const REGULAR_LEGACY: u8 = b'\0';
const HARDLINK: u8 = b'1';
const SYMLINK: u8 = b'2';
const CHAR_DEVICE: u8 = b'3';
const BLOCK_DEVICE: u8 = b'4';
const DIRECTORY: u8 = b'5';
const FIFO: u8 = b'6';

/// Tar archive handler over a (possibly gzipped) byte stream.
pub struct TarArchive<R: Read> {
    archive: ::tar::Archive<TarStream<R>>,
    codec: CompressionCodec,
}

impl<R: Read> TarArchive<R> {
    /// Wraps `reader`, sniffing it for gzip framing.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::Stream`] if the first bytes cannot be read.
    pub fn new(reader: R) -> Result<Self> {
        let stream = TarStream::detect(reader).map_err(ExtractionError::Stream)?;
        let codec = stream.codec();
        Ok(Self {
            archive: ::tar::Archive::new(stream),
            codec,
        })
    }

    /// Extracts every entry beneath `dest`.
    ///
    /// Directories, regular files, devices and FIFOs (written as regular
    /// files), symlinks and hard links are accepted. Any other type flag
    /// aborts with [`ExtractionError::UnknownEntryType`]. The first error
    /// halts extraction; entries already written stay on disk.
    pub fn extract(
        &mut self,
        dest: &DestDir,
        config: &ExtractConfig,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ExtractionReport> {
        let strip = config.strip_components;
        let mut sink = EntrySink::new(dest, config, progress);

        for entry in self.archive.entries().map_err(ExtractionError::Stream)? {
            let mut entry = entry.map_err(ExtractionError::Stream)?;
            let raw_name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
            let Some(path) = strip_components(&raw_name, strip) else {
                sink.skip();
                continue;
            };

            let header = entry.header();
            // The raw flag byte; `EntryType` folds `\0` into `0`.
            match header.as_old().linkflag[0] {
                DIRECTORY => sink.directory(&path)?,
                // Pre-POSIX archives mark directories with a trailing slash.
                REGULAR_LEGACY if raw_name.ends_with('/') => sink.directory(&path)?,
                REGULAR | REGULAR_LEGACY | CHAR_DEVICE | BLOCK_DEVICE | FIFO => {
                    let mode = header.mode().map_err(|e| {
                        ExtractionError::InvalidArchive(format!("{path}: invalid mode: {e}"))
                    })?;
                    let size = entry.size();
                    sink.file(&path, &mut entry, mode, Some(size))?;
                }
                SYMLINK => {
                    let target = link_name(&entry);
                    sink.symlink(&path, Path::new(&target))?;
                }
                HARDLINK => {
                    let target = hardlink_target(&path, &link_name(&entry), strip)?;
                    sink.hardlink(&path, &target)?;
                }
                flag => {
                    return Err(ExtractionError::UnknownEntryType {
                        path: path.as_path().to_path_buf(),
                        flag: char::from(flag),
                    });
                }
            }
        }

        let mut report = sink.finish();
        report.compression = self.codec;
        Ok(report)
    }
}

fn link_name<R: Read>(entry: &::tar::Entry<'_, R>) -> String {
    entry
        .link_name_bytes()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

/// Strips a hard link's target the same way as entry names.
fn hardlink_target(path: &StrippedPath, link_name: &str, strip: usize) -> Result<StrippedPath> {
    strip_components(link_name, strip).ok_or_else(|| {
        ExtractionError::io(
            path.as_path(),
            Operation::CreateHardlink,
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("link target {link_name:?} has no path after stripping"),
            ),
        )
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::report::NoopProgress;
    use crate::test_utils::TarTestBuilder;
    use crate::test_utils::gzip;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn extract(data: Vec<u8>, strip: usize) -> (TempDir, Result<ExtractionReport>) {
        let temp = TempDir::new().expect("failed to create temp dir");
        let dest = DestDir::new(temp.path().join("out"));
        let config = ExtractConfig::default().with_strip_components(strip);
        let result = TarArchive::new(Cursor::new(data))
            .and_then(|mut archive| archive.extract(&dest, &config, &mut NoopProgress));
        (temp, result)
    }

    #[test]
    fn test_extract_files_and_directories() {
        let data = TarTestBuilder::new()
            .add_directory("dir/")
            .add_file("dir/file.txt", b"hi")
            .add_file("top.txt", b"top")
            .build();

        let (temp, result) = extract(data, 0);
        let report = result.unwrap();
        let out = temp.path().join("out");

        assert_eq!(report.directories_created, 1);
        assert_eq!(report.files_extracted, 2);
        assert_eq!(report.bytes_written, 5);
        assert_eq!(fs::read_to_string(out.join("dir/file.txt")).unwrap(), "hi");
        assert_eq!(fs::read_to_string(out.join("top.txt")).unwrap(), "top");
    }

    #[test]
    fn test_codec_is_reported() {
        let plain = TarTestBuilder::new().add_file("a", b"a").build();

        let (_temp, result) = extract(plain.clone(), 0);
        assert_eq!(result.unwrap().compression, CompressionCodec::None);

        let (_temp, result) = extract(gzip(&plain), 0);
        assert_eq!(result.unwrap().compression, CompressionCodec::Gzip);
    }

    #[test]
    fn test_strip_skips_wrapper_entries() {
        let data = TarTestBuilder::new()
            .add_directory("proj-1.0/")
            .add_file("proj-1.0/a.txt", b"a")
            .build();

        let (temp, result) = extract(data, 1);
        let report = result.unwrap();
        assert_eq!(report.entries_skipped, 1);
        assert_eq!(report.files_extracted, 1);
        assert!(temp.path().join("out/a.txt").is_file());
    }

    #[test]
    fn test_device_and_fifo_written_as_files() {
        let data = TarTestBuilder::new()
            .add_entry_with_flag("dev/tty", CHAR_DEVICE)
            .add_entry_with_flag("dev/sda", BLOCK_DEVICE)
            .add_entry_with_flag("pipe", FIFO)
            .build();

        let (temp, result) = extract(data, 0);
        let report = result.unwrap();
        assert_eq!(report.files_extracted, 3);
        for name in ["dev/tty", "dev/sda", "pipe"] {
            let meta = fs::symlink_metadata(temp.path().join("out").join(name)).unwrap();
            assert!(meta.is_file(), "{name} should be a regular file");
            assert_eq!(meta.len(), 0);
        }
    }

    #[test]
    fn test_legacy_directory_with_trailing_slash() {
        let data = TarTestBuilder::new()
            .add_entry_with_flag("legacy/", REGULAR_LEGACY)
            .add_entry_with_flag("legacy/file", REGULAR_LEGACY)
            .build();

        let (temp, result) = extract(data, 0);
        let report = result.unwrap();
        assert_eq!(report.directories_created, 1);
        assert_eq!(report.files_extracted, 1);
        assert!(temp.path().join("out/legacy").is_dir());
        assert!(temp.path().join("out/legacy/file").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_hardlink_target_is_stripped() {
        let data = TarTestBuilder::new()
            .add_file("wrap/original.txt", b"same")
            .add_hardlink("wrap/linked.txt", "wrap/original.txt")
            .build();

        let (temp, result) = extract(data, 1);
        assert_eq!(result.unwrap().hardlinks_created, 1);
        let linked = fs::read(temp.path().join("out/linked.txt")).unwrap();
        assert_eq!(linked, b"same");
    }

    #[test]
    fn test_hardlink_target_stripped_away_fails() {
        let data = TarTestBuilder::new()
            .add_hardlink("wrap/link", "toplevel")
            .build();

        let (_temp, result) = extract(data, 1);
        let err = result.unwrap_err();
        assert_eq!(err.operation(), Some(Operation::CreateHardlink));
        assert_eq!(err.path(), Some(Path::new("link")));
    }

    #[test]
    fn test_unknown_type_names_stripped_path() {
        let data = TarTestBuilder::new()
            .add_entry_with_flag("wrap/odd", b'Z')
            .build();

        let (_temp, result) = extract(data, 1);
        let err = result.unwrap_err();
        assert!(err.is_format_error());
        assert_eq!(err.to_string(), "odd: unknown type flag: Z");
    }

    #[test]
    fn test_empty_stream() {
        let (_temp, result) = extract(Vec::new(), 0);
        assert_eq!(result.unwrap().total_items(), 0);
    }

    #[test]
    fn test_archive_cut_mid_entry_fails_that_entry() {
        let data = TarTestBuilder::new().add_file("big", &[1u8; 4096]).build();
        let cut = data[..512 + 1000].to_vec();

        let (temp, result) = extract(cut, 0);
        let err = result.unwrap_err();
        assert_eq!(err.operation(), Some(Operation::WriteFile));
        assert_eq!(err.path(), Some(Path::new("big")));
        assert!(err.to_string().starts_with("big: writing file: unexpected EOF"));
        assert_eq!(fs::metadata(temp.path().join("out/big")).unwrap().len(), 1000);
    }

    #[test]
    fn test_truncated_gzip_is_stream_error() {
        let data = TarTestBuilder::new().add_file("f", &[7u8; 4096]).build();
        let mut compressed = gzip(&data);
        compressed.truncate(compressed.len() / 2);

        let (_temp, result) = extract(compressed, 0);
        assert!(result.unwrap_err().is_io_error());
    }
}
