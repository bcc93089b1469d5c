//! Extraction helpers that sit around a single extraction run.

pub mod staging;

pub use staging::extract_staged;
pub use staging::staging_path;
