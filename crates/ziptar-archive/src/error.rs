use std::io;
use std::path::PathBuf;

use crate::format::Compression;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} compression support was not compiled in")]
    UnsupportedCompression(Compression),

    #[error("path is not valid UTF-8: '{path}'")]
    NonUtf8Path { path: PathBuf },

    #[error("failed to walk '{path}': {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("failed to add '{path}' to archive: {source}")]
    AppendFailed { path: PathBuf, source: io::Error },

    #[error("failed to extract '{path}': {source}")]
    ExtractionFailed { path: PathBuf, source: io::Error },

    #[error("failed to create directory: {path}: {source}")]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
