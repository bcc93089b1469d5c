//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io;
use std::io::Write;
use std::path::Path;
use unfurl_core::ArchiveFormat;
use unfurl_core::ExtractionReport;

pub struct JsonFormatter;

#[derive(Serialize)]
struct ExtractionOutput {
    destination: String,
    format: &'static str,
    compression: &'static str,
    files_extracted: usize,
    directories_created: usize,
    symlinks_created: usize,
    hardlinks_created: usize,
    entries_skipped: usize,
    bytes_written: u64,
    duration_ms: u128,
}

impl ExtractionOutput {
    fn new(destination: &Path, format: ArchiveFormat, report: &ExtractionReport) -> Self {
        Self {
            destination: destination.display().to_string(),
            format: format.name(),
            compression: report.compression.name(),
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            symlinks_created: report.symlinks_created,
            hardlinks_created: report.hardlinks_created,
            entries_skipped: report.entries_skipped,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_result(
        &self,
        destination: &Path,
        format: ArchiveFormat,
        report: &ExtractionReport,
    ) -> Result<()> {
        let output = JsonOutput::success(
            "extract",
            ExtractionOutput::new(destination, format, report),
        );
        Self::output(&output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::error("extract", format!("{error:#}"));
        let _ = Self::output(&output);
    }

    fn format_info(&self, _message: &str) {}
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_output_fields() {
        let report = ExtractionReport {
            files_extracted: 3,
            directories_created: 1,
            bytes_written: 42,
            ..ExtractionReport::default()
        };

        let data = ExtractionOutput::new(Path::new("proj-1"), ArchiveFormat::Tar, &report);
        let json = serde_json::to_value(JsonOutput::success("extract", data)).unwrap();

        assert_eq!(json["operation"], "extract");
        assert_eq!(json["data"]["destination"], "proj-1");
        assert_eq!(json["data"]["format"], "tar");
        assert_eq!(json["data"]["compression"], "none");
        assert_eq!(json["data"]["files_extracted"], 3);
        assert_eq!(json["data"]["bytes_written"], 42);
    }
}
