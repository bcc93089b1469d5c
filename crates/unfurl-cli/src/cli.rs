//! CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "unfurl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// URL of the archive (.zip, .tar, .tar.gz, .tgz)
    #[arg(value_name = "URL")]
    pub url: String,

    /// Destination to unpack into (default: URL file name without extensions)
    #[arg(short, long, value_name = "DIR")]
    pub destination: Option<PathBuf>,

    /// Strip leading path components from archive entries
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub strip: usize,

    /// Print each entry as it is extracted
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,
}

impl Cli {
    /// Returns the explicit destination or the one derived from the URL.
    pub fn destination(&self) -> PathBuf {
        self.destination
            .clone()
            .unwrap_or_else(|| PathBuf::from(default_destination(&self.url)))
    }
}

/// Derives a destination name from the URL's last path segment with every
/// extension removed: `https://host/proj-1.0.tar.gz` becomes `proj-1`.
pub fn default_destination(url: &str) -> &str {
    let mut base = url.trim_end_matches('/').rsplit('/').next().unwrap_or(url);
    while let Some(dot) = base.rfind('.') {
        base = &base[..dot];
    }
    base
}
