//! Progress reporting for CLI operations.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressState;
use indicatif::ProgressStyle;
use std::fmt::Write;
use std::path::Path;
use std::time::Duration;
use unfurl_core::EntryKind;
use unfurl_core::ProgressCallback;

/// Spinner implementing `ProgressCallback`.
///
/// The number of entries in a streamed archive is unknown up front, so this
/// shows a spinner with the entry count, bytes written and throughput. Only
/// used when stderr, where the spinner draws, is a TTY. Cleared on drop.
pub struct CliProgress {
    bar: ProgressBar,
    entries: u64,
}

impl CliProgress {
    /// Creates a new spinner with the given message.
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();

        // Template: "⠋ Extracting 42 entries (15.2 MB, 5.1 MB/s)"
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg} {entries} entries ({bytes}, {bytes_per_sec})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .with_key("entries", |state: &ProgressState, w: &mut dyn Write| {
                    write!(w, "{}", state.len().unwrap_or(0)).unwrap_or(());
                })
                .with_key("bytes", |state: &ProgressState, w: &mut dyn Write| {
                    write!(w, "{}", humanize_bytes(state.pos())).unwrap_or(());
                })
                .with_key("bytes_per_sec", |state: &ProgressState, w: &mut dyn Write| {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    let bytes_per_sec = state.per_sec() as u64;
                    write!(w, "{}/s", humanize_bytes(bytes_per_sec)).unwrap_or(());
                }),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar, entries: 0 }
    }

    /// Checks if the spinner's terminal is interactive.
    #[must_use]
    pub fn should_show() -> bool {
        Term::stderr().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress {
    fn on_entry(&mut self, _path: &Path, _kind: &EntryKind) {
        // The bar length doubles as the entry counter.
        self.entries += 1;
        self.bar.set_length(self.entries);
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bar.inc(bytes);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Prints ` - <path>` for every entry as it is extracted.
pub struct VerboseProgress {
    term: Term,
}

impl VerboseProgress {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    fn line(path: &Path) -> String {
        format!(" - {}", path.display())
    }
}

impl Default for VerboseProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressCallback for VerboseProgress {
    fn on_entry(&mut self, path: &Path, _kind: &EntryKind) {
        let _ = self.term.write_line(&Self::line(path));
    }

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_complete(&mut self) {}
}

/// Converts bytes to human-readable format (KB, MB, GB, TB).
pub fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_bytes() {
        assert_eq!(humanize_bytes(0), "0 B");
        assert_eq!(humanize_bytes(512), "512 B");
        assert_eq!(humanize_bytes(1024), "1.0 KB");
        assert_eq!(humanize_bytes(1536), "1.5 KB");
        assert_eq!(humanize_bytes(1024 * 1024), "1.0 MB");
        assert_eq!(humanize_bytes(1024 * 1024 * 1024), "1.0 GB");
        assert_eq!(humanize_bytes(1024_u64.pow(4)), "1.0 TB");
    }

    #[test]
    fn test_verbose_line() {
        assert_eq!(
            VerboseProgress::line(Path::new("dir/file.txt")),
            " - dir/file.txt"
        );
        assert_eq!(VerboseProgress::line(Path::new("dir/")), " - dir/");
    }

    #[test]
    fn test_should_show_follows_stderr() {
        assert_eq!(CliProgress::should_show(), Term::stderr().is_term());
    }

    #[test]
    fn test_progress_callback() {
        let mut progress = CliProgress::new("Testing");

        progress.on_entry(Path::new("test.txt"), &EntryKind::File);
        progress.on_bytes_written(1024);
        progress.on_entry(Path::new("dir"), &EntryKind::Directory);

        assert_eq!(progress.entries, 2);
        assert_eq!(progress.bar.position(), 1024);
    }
}
