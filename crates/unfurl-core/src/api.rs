//! High-level public API for archive extraction.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use crate::ExtractConfig;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Result;
use crate::formats::ArchiveFormat;
use crate::formats::TarArchive;
use crate::formats::ZipArchive;
use crate::formats::detect::extension_hint;
use crate::report::NoopProgress;
use crate::report::ProgressCallback;
use crate::types::DestDir;

/// Extracts an archive stream beneath `dest`.
///
/// `hint` selects the format: `.zip` buffers the whole stream and extracts
/// it as a zip archive, anything else streams it through the tar extractor
/// with gzip auto-detection. Typically the hint is the extension of the URL
/// or file name the stream came from.
///
/// # Errors
///
/// Returns an error if:
/// - Reading the stream fails
/// - The archive is malformed or holds an unsupported tar entry type
/// - Creating a directory, file or link fails
///
/// Extraction stops at the first error. Entries written before it remain on
/// disk.
///
/// # Examples
///
/// ```no_run
/// use std::io;
/// use unfurl_core::ExtractConfig;
/// use unfurl_core::NoopProgress;
/// use unfurl_core::extract_reader;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ExtractConfig::default().with_strip_components(1);
/// let report = extract_reader(io::stdin(), ".gz", "out", &config, &mut NoopProgress)?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_reader<R: Read, P: AsRef<Path>>(
    reader: R,
    hint: &str,
    dest: P,
    config: &ExtractConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    extract_format(reader, ArchiveFormat::from_hint(hint), dest, config, progress)
}

/// Extracts an archive stream of an already selected format beneath `dest`.
///
/// # Errors
///
/// Same as [`extract_reader`].
pub fn extract_format<R: Read, P: AsRef<Path>>(
    mut reader: R,
    format: ArchiveFormat,
    dest: P,
    config: &ExtractConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    let start = Instant::now();
    let dest = DestDir::new(dest.as_ref());

    let mut report = match format {
        ArchiveFormat::Zip => {
            let mut data = Vec::new();
            reader
                .read_to_end(&mut data)
                .map_err(ExtractionError::Stream)?;
            ZipArchive::new(&data)?.extract(&dest, config, progress)?
        }
        ArchiveFormat::Tar => TarArchive::new(reader)?.extract(&dest, config, progress)?,
    };

    report.duration = start.elapsed();
    progress.on_complete();
    Ok(report)
}

/// Extracts a local archive file beneath `output_dir`.
///
/// The format is chosen from the file name's extension, as with
/// [`extract_reader`].
///
/// # Errors
///
/// Returns [`ExtractionError::Stream`] if the file cannot be opened, and
/// any error [`extract_reader`] returns.
///
/// # Examples
///
/// ```no_run
/// use unfurl_core::ExtractConfig;
/// use unfurl_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ExtractConfig::default();
/// let report = extract_archive("archive.tar.gz", "/tmp/output", &config)?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractConfig,
) -> Result<ExtractionReport> {
    extract_archive_with_progress(archive_path, output_dir, config, &mut NoopProgress)
}

/// Extracts a local archive file, reporting each entry to `progress`.
///
/// # Errors
///
/// Same as [`extract_archive`].
pub fn extract_archive_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    let archive_path = archive_path.as_ref();
    let file = File::open(archive_path).map_err(ExtractionError::Stream)?;
    let source = archive_path.to_string_lossy();
    extract_reader(
        BufReader::new(file),
        extension_hint(&source),
        output_dir,
        config,
        progress,
    )
}
