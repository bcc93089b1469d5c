//! Archive format implementations.

pub(crate) mod common;
pub mod compression;
pub mod detect;
pub mod tar;
pub mod zip;

// Re-export main types for convenience
pub use compression::CompressionCodec;
pub use detect::ArchiveFormat;
pub use tar::TarArchive;
pub use zip::ZipArchive;
