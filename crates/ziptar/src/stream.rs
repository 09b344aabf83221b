use std::fs::File;
use std::io::{self, BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use anyhow::Context;

/// Where the archive bytes come from or go to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArchiveStream {
    File(PathBuf),
    /// Standard input when reading, standard output when writing.
    Standard,
}

/// Seekable archive input.
///
/// Zip needs random access, so standard input is read into memory first.
#[derive(Debug)]
pub enum ArchiveReader {
    File(BufReader<File>),
    Memory(Cursor<Vec<u8>>),
}

impl ArchiveReader {
    pub fn open<R: Read>(
        stream: &ArchiveStream,
        workdir: &Path,
        mut stdin: R,
    ) -> anyhow::Result<Self> {
        match stream {
            ArchiveStream::File(path) => {
                let path = workdir.join(path);
                let file = File::open(&path)
                    .with_context(|| format!("failed to open archive '{}'", path.display()))?;
                Ok(Self::File(BufReader::new(file)))
            }
            ArchiveStream::Standard => {
                let mut buf = Vec::new();
                stdin
                    .read_to_end(&mut buf)
                    .context("failed to read archive from standard input")?;
                Ok(Self::Memory(Cursor::new(buf)))
            }
        }
    }
}

impl Read for ArchiveReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::File(r) => r.read(buf),
            Self::Memory(r) => r.read(buf),
        }
    }
}

impl Seek for ArchiveReader {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            Self::File(r) => r.seek(pos),
            Self::Memory(r) => r.seek(pos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_input_is_buffered() {
        let stdin: &[u8] = b"archive";
        let stream = ArchiveStream::Standard;
        let mut reader = ArchiveReader::open(&stream, Path::new("."), stdin).unwrap();
        reader.seek(SeekFrom::Start(3)).unwrap();

        let mut rest = String::new();
        reader.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "hive");
    }

    #[test]
    fn file_is_opened_relative_to_workdir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.zip"), b"bytes").unwrap();

        let stream = ArchiveStream::File(PathBuf::from("a.zip"));
        let reader = ArchiveReader::open(&stream, dir.path(), io::empty());
        assert!(matches!(reader, Ok(ArchiveReader::File(_))));
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let stream = ArchiveStream::File(PathBuf::from("missing.zip"));

        let result = ArchiveReader::open(&stream, dir.path(), io::empty());
        assert!(result.unwrap_err().to_string().contains("missing.zip"));
    }
}
