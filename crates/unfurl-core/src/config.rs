//! Extraction configuration.

/// Whether the host filesystem can represent POSIX permission bits.
///
/// Resolved once per run and threaded through the entry writer. When the
/// capability is missing, failures to apply an entry's mode are ignored
/// instead of aborting the extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionSupport {
    /// Full POSIX mode bits; mode-apply failures are errors.
    Posix,
    /// Mode bits cannot be fully represented; mode-apply failures are ignored.
    Unsupported,
}

impl PermissionSupport {
    /// Detects the capability of the current platform.
    #[must_use]
    pub const fn detect() -> Self {
        if cfg!(unix) {
            Self::Posix
        } else {
            Self::Unsupported
        }
    }

    /// Returns `true` if mode-apply failures must be propagated.
    #[must_use]
    pub const fn is_posix(self) -> bool {
        matches!(self, Self::Posix)
    }
}

impl Default for PermissionSupport {
    fn default() -> Self {
        Self::detect()
    }
}

/// Settings for one extraction run.
///
/// # Examples
///
/// ```
/// use unfurl_core::ExtractConfig;
/// use unfurl_core::PermissionSupport;
///
/// let config = ExtractConfig::default()
///     .with_strip_components(1)
///     .with_permissions(PermissionSupport::Unsupported);
/// assert_eq!(config.strip_components, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExtractConfig {
    /// Number of leading path segments removed from every entry name.
    pub strip_components: usize,

    /// Permission capability of the destination filesystem.
    pub permissions: PermissionSupport,
}

impl ExtractConfig {
    /// Creates a configuration with no stripping and detected permissions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of leading path segments to strip.
    #[must_use]
    pub const fn with_strip_components(mut self, count: usize) -> Self {
        self.strip_components = count;
        self
    }

    /// Overrides the detected permission capability.
    #[must_use]
    pub const fn with_permissions(mut self, permissions: PermissionSupport) -> Self {
        self.permissions = permissions;
        self
    }
}
