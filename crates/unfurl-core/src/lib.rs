//! Archive extraction engine for zip and (optionally gzipped) tar streams.
//!
//! `unfurl-core` takes a readable archive stream plus a source hint (usually
//! the file extension of the URL it came from) and materializes the entries
//! beneath a destination root. Leading path components can be stripped from
//! every entry, which is how a wrapping `project-1.0/` directory is dropped.
//!
//! # Examples
//!
//! ```no_run
//! use unfurl_core::ExtractConfig;
//! use unfurl_core::extract_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExtractConfig::default().with_strip_components(1);
//! let report = extract_archive("project-1.0.tar.gz", "/output/dir", &config)?;
//! println!("Extracted {} files", report.files_extracted);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod copy;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod report;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod types;
pub mod writer;

// Re-export main API types
pub use api::extract_archive;
pub use api::extract_archive_with_progress;
pub use api::extract_format;
pub use api::extract_reader;
pub use config::ExtractConfig;
pub use config::PermissionSupport;
pub use error::ExtractionError;
pub use error::Operation;
pub use error::Result;
pub use formats::ArchiveFormat;
pub use formats::CompressionCodec;
pub use report::ExtractionReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;

// Re-export types module for easier access
pub use types::DestDir;
pub use types::EntryKind;
pub use types::StrippedPath;
pub use types::strip_components;
