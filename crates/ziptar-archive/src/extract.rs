//! Zip extraction.
//!
//! Every target path is computed from the normalized member name, never the
//! raw one, so nothing is written outside the destination directory.

use std::fs;
use std::io::{self, Read, Seek};
use std::path::Path;

use tracing::{debug, warn};

use crate::entry::{ArchiveReport, Entry, EntryKind};
use crate::error::{Error, Result};
use crate::format::ArchiveType;
use crate::sanitize::sanitize_member;

/// Extract every member of a zip archive under `destination`.
///
/// Members whose raw name ends in `/` become directories. Parent
/// directories are created as needed. Members with no usable target path
/// are skipped and recorded in the report. A failure part way through
/// leaves the members written so far in place.
pub fn extract_zip<R: Read + Seek>(reader: R, destination: &Path) -> Result<ArchiveReport> {
    let mut archive = zip::ZipArchive::new(reader)?;
    let mut report = ArchiveReport::new(ArchiveType::Zip);

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let raw_name = file.name().to_owned();

        let Some(sanitized) = sanitize_member(&raw_name, destination) else {
            warn!(name = %raw_name, "skipping member without a usable path");
            report.skipped.push(raw_name);
            continue;
        };

        let entry = if raw_name.ends_with('/') {
            ensure_directory(&sanitized.resolved)?;
            Entry::new(sanitized.relative, 0, EntryKind::Directory)
        } else {
            let size = write_file(&mut file, &sanitized.resolved)?;
            Entry::new(sanitized.relative, size, EntryKind::File)
        };

        debug!(name = %raw_name, target = %sanitized.resolved.display(), "extracted");
        report.push(entry.with_target_path(sanitized.resolved));
    }

    Ok(report)
}

fn write_file<R: Read>(reader: &mut R, target_path: &Path) -> Result<u64> {
    if let Some(parent) = target_path.parent() {
        ensure_directory(parent)?;
    }

    let mut file = fs::File::create(target_path).map_err(|e| Error::ExtractionFailed {
        path: target_path.to_path_buf(),
        source: e,
    })?;
    let size = io::copy(reader, &mut file).map_err(|e| Error::ExtractionFailed {
        path: target_path.to_path_buf(),
        source: e,
    })?;

    Ok(size)
}

fn ensure_directory(path: &Path) -> Result<()> {
    if !path.is_dir() {
        fs::create_dir_all(path).map_err(|e| Error::DirectoryCreationFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use zip::write::SimpleFileOptions;

    use super::*;

    fn zip_with(names: &[(&str, &[u8])]) -> Cursor<Vec<u8>> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, content) in names {
            if name.ends_with('/') {
                zip.add_directory(*name, options).unwrap();
            } else {
                zip.start_file(*name, options).unwrap();
                zip.write_all(content).unwrap();
            }
        }
        let mut cursor = zip.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    #[test]
    fn traversal_names_stay_inside_destination() {
        let dest = tempfile::tempdir().unwrap();
        let archive = zip_with(&[("../../escape.txt", b"nope"), ("a/./b/../c.txt", b"c")]);

        let report = extract_zip(archive, dest.path()).unwrap();

        assert_eq!(
            report.names().collect::<Vec<_>>(),
            ["escape.txt", "a/c.txt"]
        );
        assert_eq!(fs::read(dest.path().join("escape.txt")).unwrap(), b"nope");
        assert_eq!(fs::read(dest.path().join("a").join("c.txt")).unwrap(), b"c");
        assert!(!dest.path().parent().unwrap().join("escape.txt").exists());
    }

    #[test]
    fn directory_members_become_directories() {
        let dest = tempfile::tempdir().unwrap();
        let archive = zip_with(&[("empty/", b"")]);

        let report = extract_zip(archive, dest.path()).unwrap();

        assert!(dest.path().join("empty").is_dir());
        assert!(report.entries[0].is_directory());
    }

    #[test]
    fn empty_names_are_skipped_by_default() {
        let dest = tempfile::tempdir().unwrap();
        let archive = zip_with(&[("../..", b"x"), ("kept.txt", b"k")]);

        let report = extract_zip(archive, dest.path()).unwrap();

        assert_eq!(report.skipped, ["../.."]);
        assert_eq!(report.entry_count, 1);
        assert_eq!(fs::read_dir(dest.path()).unwrap().count(), 1);
    }

    #[test]
    fn corrupted_archive_is_an_error() {
        let dest = tempfile::tempdir().unwrap();
        let result = extract_zip(Cursor::new(vec![0xDE, 0xAD, 0xBE, 0xEF]), dest.path());
        assert!(matches!(result, Err(Error::Zip(_))));
    }
}
