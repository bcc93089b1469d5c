//! Buffered copy from entry content into a destination file.
//!
//! One [`CopyBuffer`] is allocated per extraction run and reused for every
//! file entry, and each chunk is reported to the run's progress callback.

use std::io;
use std::io::Read;
use std::io::Write;

use crate::report::ProgressCallback;

/// Chunk size for entry copies (64KB).
pub const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Reusable heap buffer for copying entry content.
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Creates a new zeroed copy buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE].into_boxed_slice(),
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies `reader` into `writer`, reporting every chunk to `progress`.
///
/// Returns the total number of bytes copied. Interrupted reads are retried.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use unfurl_core::NoopProgress;
/// use unfurl_core::copy::CopyBuffer;
/// use unfurl_core::copy::copy_with_progress;
///
/// let mut buffer = CopyBuffer::new();
/// let mut output = Vec::new();
/// let copied = copy_with_progress(
///     &mut Cursor::new(b"hello"),
///     &mut output,
///     &mut buffer,
///     &mut NoopProgress,
/// )?;
/// assert_eq!(copied, 5);
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn copy_with_progress<R, W>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
    progress: &mut dyn ProgressCallback,
) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        writer.write_all(&buffer.buf[..bytes_read])?;

        let chunk = bytes_read as u64;
        total = total.saturating_add(chunk);
        progress.on_bytes_written(chunk);
    }

    Ok(total)
}
