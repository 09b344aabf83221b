use std::fmt;
use std::io::{self, Write};

use crate::Error;

/// Archive family plus, for tar, its outer compression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveType {
    Zip,
    Tar(Compression),
}

/// Compression codec wrapped around a tar stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    None,
    Gzip,
    Bzip2,
}

impl fmt::Display for ArchiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zip => f.write_str("zip"),
            Self::Tar(Compression::None) => f.write_str("tar"),
            Self::Tar(Compression::Gzip) => f.write_str("tar.gz"),
            Self::Tar(Compression::Bzip2) => f.write_str("tar.bz2"),
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Gzip => f.write_str("gzip"),
            Self::Bzip2 => f.write_str("bzip2"),
        }
    }
}

impl Compression {
    /// Wrap `writer` in an encoder for this codec at its default level.
    pub fn encoder<W: Write>(self, writer: W) -> Result<Encoder<W>, Error> {
        match self {
            Self::None => Ok(Encoder::Passthrough(writer)),
            #[cfg(feature = "gzip")]
            Self::Gzip => Ok(Encoder::Gzip(flate2::write::GzEncoder::new(
                writer,
                flate2::Compression::default(),
            ))),
            #[cfg(not(feature = "gzip"))]
            Self::Gzip => Err(Error::UnsupportedCompression(self)),
            #[cfg(feature = "bzip2")]
            Self::Bzip2 => Ok(Encoder::Bzip2(bzip2::write::BzEncoder::new(
                writer,
                bzip2::Compression::default(),
            ))),
            #[cfg(not(feature = "bzip2"))]
            Self::Bzip2 => Err(Error::UnsupportedCompression(self)),
        }
    }
}

/// Encoder wrapper for tar compression.
pub enum Encoder<W: Write> {
    Passthrough(W),
    #[cfg(feature = "gzip")]
    Gzip(flate2::write::GzEncoder<W>),
    #[cfg(feature = "bzip2")]
    Bzip2(bzip2::write::BzEncoder<W>),
}

impl<W: Write> Encoder<W> {
    /// Write the codec trailer and hand back the inner writer.
    pub fn finish(self) -> io::Result<W> {
        match self {
            Self::Passthrough(w) => Ok(w),
            #[cfg(feature = "gzip")]
            Self::Gzip(e) => e.finish(),
            #[cfg(feature = "bzip2")]
            Self::Bzip2(e) => e.finish(),
        }
    }
}

impl<W: Write> Write for Encoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Passthrough(w) => w.write(buf),
            #[cfg(feature = "gzip")]
            Self::Gzip(e) => e.write(buf),
            #[cfg(feature = "bzip2")]
            Self::Bzip2(e) => e.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Passthrough(w) => w.flush(),
            #[cfg(feature = "gzip")]
            Self::Gzip(e) => e.flush(),
            #[cfg(feature = "bzip2")]
            Self::Bzip2(e) => e.flush(),
        }
    }
}
