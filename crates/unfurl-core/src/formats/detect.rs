//! Archive format selection from a source hint.

/// The two archive formats the engine understands.
///
/// Selected once per run. Zip needs random access to its central directory
/// and is buffered fully; tar is consumed as a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
    /// ZIP archive.
    Zip,
    /// Tar archive, gzip-compressed or plain.
    Tar,
}

impl ArchiveFormat {
    /// Selects the format for a source hint such as a file extension.
    ///
    /// Only the exact hint `.zip` selects zip. Everything else is handed to
    /// the tar extractor, which detects gzip framing by itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use unfurl_core::ArchiveFormat;
    ///
    /// assert_eq!(ArchiveFormat::from_hint(".zip"), ArchiveFormat::Zip);
    /// assert_eq!(ArchiveFormat::from_hint(".gz"), ArchiveFormat::Tar);
    /// assert_eq!(ArchiveFormat::from_hint(""), ArchiveFormat::Tar);
    /// ```
    #[must_use]
    pub fn from_hint(hint: &str) -> Self {
        if hint == ".zip" { Self::Zip } else { Self::Tar }
    }

    /// Selects the format for a URL or path by its extension.
    #[must_use]
    pub fn from_source(source: &str) -> Self {
        Self::from_hint(extension_hint(source))
    }

    /// Returns the format name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::Tar => "tar",
        }
    }
}

/// Returns the extension of the last `/`-separated segment of `source`,
/// including the leading dot, or an empty string.
///
/// # Examples
///
/// ```
/// use unfurl_core::formats::detect::extension_hint;
///
/// assert_eq!(extension_hint("https://host/v1.2/proj.tar.gz"), ".gz");
/// assert_eq!(extension_hint("https://host/archive.zip"), ".zip");
/// assert_eq!(extension_hint("https://host.example/download"), "");
/// ```
#[must_use]
pub fn extension_hint(source: &str) -> &str {
    let name = source.rsplit('/').next().unwrap_or(source);
    name.rfind('.').map_or("", |dot| &name[dot..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_hint_is_exact() {
        assert_eq!(ArchiveFormat::from_hint(".zip"), ArchiveFormat::Zip);
        assert_eq!(ArchiveFormat::from_hint(".ZIP"), ArchiveFormat::Tar);
        assert_eq!(ArchiveFormat::from_hint("zip"), ArchiveFormat::Tar);
        assert_eq!(ArchiveFormat::from_hint(".zipx"), ArchiveFormat::Tar);
    }

    #[test]
    fn test_everything_else_is_tar() {
        for hint in [".tar", ".gz", ".tgz", ".bz2", ".xz", ""] {
            assert_eq!(ArchiveFormat::from_hint(hint), ArchiveFormat::Tar, "{hint}");
        }
    }

    #[test]
    fn test_extension_hint() {
        assert_eq!(extension_hint("archive.tar.gz"), ".gz");
        assert_eq!(extension_hint("a.b/c"), "");
        assert_eq!(extension_hint("https://example.com/dl/pkg.zip"), ".zip");
        assert_eq!(extension_hint("https://example.com/dl/"), "");
        assert_eq!(extension_hint("noext"), "");
    }

    #[test]
    fn test_from_source() {
        assert_eq!(
            ArchiveFormat::from_source("https://example.com/repo-1.0.zip"),
            ArchiveFormat::Zip
        );
        assert_eq!(
            ArchiveFormat::from_source("https://example.com/repo-1.0.tar.gz"),
            ArchiveFormat::Tar
        );
        // Query strings are part of the last segment.
        assert_eq!(
            ArchiveFormat::from_source("https://example.com/a.zip?raw=1"),
            ArchiveFormat::Tar
        );
    }

    #[test]
    fn test_names() {
        assert_eq!(ArchiveFormat::Zip.name(), "zip");
        assert_eq!(ArchiveFormat::Tar.name(), "tar");
    }
}
