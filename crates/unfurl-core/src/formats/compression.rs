//! Gzip auto-detection for tar streams.
//!
//! A tar stream may or may not be gzip-compressed. The first two bytes are
//! sniffed for the gzip magic and then replayed in front of the remaining
//! stream, so falling back to plain tar loses nothing.

use std::io;
use std::io::Chain;
use std::io::Cursor;
use std::io::Read;

use flate2::read::MultiGzDecoder;

/// Gzip member header magic.
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Compression detected on a tar stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CompressionCodec {
    /// No compression, plain tar.
    #[default]
    None,
    /// Gzip framing (one or more members).
    Gzip,
}

impl CompressionCodec {
    /// Returns the codec name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gzip => "gzip",
        }
    }
}

type Replayed<R> = Chain<Cursor<Vec<u8>>, R>;

/// A tar byte stream with gzip framing removed, if there was any.
pub enum TarStream<R: Read> {
    /// Plain tar bytes.
    Plain(Replayed<R>),
    /// Gzip-compressed tar bytes.
    Gzip(MultiGzDecoder<Replayed<R>>),
}

impl<R: Read> TarStream<R> {
    /// Sniffs `reader` and wraps it in a gzip decoder when the magic matches.
    ///
    /// A stream shorter than the magic is treated as plain tar.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if reading the first bytes fails.
    pub fn detect(mut reader: R) -> io::Result<Self> {
        let mut prefix = Vec::with_capacity(GZIP_MAGIC.len());
        (&mut reader)
            .take(GZIP_MAGIC.len() as u64)
            .read_to_end(&mut prefix)?;

        let is_gzip = prefix == GZIP_MAGIC;
        let replayed = Cursor::new(prefix).chain(reader);
        Ok(if is_gzip {
            Self::Gzip(MultiGzDecoder::new(replayed))
        } else {
            Self::Plain(replayed)
        })
    }

    /// Returns the detected codec.
    #[must_use]
    pub const fn codec(&self) -> CompressionCodec {
        match self {
            Self::Plain(_) => CompressionCodec::None,
            Self::Gzip(_) => CompressionCodec::Gzip,
        }
    }
}

impl<R: Read> Read for TarStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Plain(inner) => inner.read(buf),
            Self::Gzip(inner) => inner.read(buf),
        }
    }
}
