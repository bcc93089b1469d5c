//! Download-and-extract command implementation.

use crate::cli::Cli;
use crate::error::Stage;
use crate::error::convert_extraction_error;
use crate::fetch::fetch;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use crate::progress::VerboseProgress;
use crate::progress::humanize_bytes;
use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use unfurl_core::ExtractConfig;
use unfurl_core::NoopProgress;
use unfurl_core::ProgressCallback;
use unfurl_core::ArchiveFormat;
use unfurl_core::extract_format;
use unfurl_core::extraction::extract_staged;
use unfurl_core::extraction::staging_path;

pub fn execute(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let destination = cli.destination();
    if destination.as_os_str().is_empty() {
        bail!(
            "cannot derive a destination from '{}'\n\
             HINT: Pass --destination explicitly.",
            cli.url
        );
    }

    formatter.format_info(&format!("Destination is {}", destination.display()));
    formatter.format_info("Downloading...");

    let download = fetch(&cli.url).context(Stage::Download)?;
    if let Some(len) = download.content_length {
        formatter.format_info(&format!("Archive size: {}", humanize_bytes(len)));
    }

    let config = ExtractConfig::default().with_strip_components(cli.strip);
    let format = ArchiveFormat::from_source(&cli.url);
    let mut progress = select_progress(cli);

    formatter.format_info(&format!(
        "Extracting into {}",
        staging_path(&destination).display()
    ));
    let report = extract_staged(&destination, |staging| {
        extract_format(download.body, format, staging, &config, progress.as_mut())
    })
    .map_err(|e| convert_extraction_error(e, &cli.url))?;

    formatter.format_extraction_result(&destination, format, &report)
}

/// Picks the per-entry reporter: entry names with `-v`, a spinner on a
/// terminal, nothing otherwise.
fn select_progress(cli: &Cli) -> Box<dyn ProgressCallback> {
    if cli.verbose && !cli.json {
        Box::new(VerboseProgress::new())
    } else if !cli.quiet && !cli.json && CliProgress::should_show() {
        Box::new(CliProgress::new("Extracting"))
    } else {
        Box::new(NoopProgress)
    }
}
