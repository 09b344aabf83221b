use std::fs::File;
use std::io::{self, Seek, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;

use crate::entry::{ArchiveReport, Entry, EntryKind};
use crate::error::{Error, Result};
use crate::format::{ArchiveType, Compression};
use crate::options::CreateOptions;
use crate::sanitize::member_name;

/// A filesystem entry found under one of the requested members.
struct Walked {
    path: PathBuf,
    name: String,
    is_dir: bool,
    size: u64,
}

/// Walk `member` (resolved against `root`) depth first in file name order.
///
/// Archive names derive from `member` as given, not from the resolved path.
/// The path excluded by `options` is left out.
fn walk_member(root: &Path, member: &Path, options: &CreateOptions) -> Result<Vec<Walked>> {
    let source = root.join(member);
    let mut walked = Vec::new();

    for entry in WalkDir::new(&source).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::Walk {
            path: source.clone(),
            source: e,
        })?;
        if options.is_excluded(entry.path()) {
            warn!(
                path = %entry.path().display(),
                "skipping the archive being written"
            );
            continue;
        }
        let metadata = entry.metadata().map_err(|e| Error::Walk {
            path: entry.path().to_path_buf(),
            source: e,
        })?;

        let suffix = entry
            .path()
            .strip_prefix(&source)
            .unwrap_or(Path::new(""));
        walked.push(Walked {
            path: entry.path().to_path_buf(),
            name: member_name(&member.join(suffix))?,
            is_dir: metadata.is_dir(),
            size: if metadata.is_dir() { 0 } else { metadata.len() },
        });
    }

    Ok(walked)
}

/// Write a zip archive holding every regular file under `members`.
///
/// Directories are walked but not stored as entries of their own.
pub fn create_zip<W, P>(
    writer: W,
    root: &Path,
    members: &[P],
    options: &CreateOptions,
) -> Result<(W, ArchiveReport)>
where
    W: Write + Seek,
    P: AsRef<Path>,
{
    let mut zip = zip::ZipWriter::new(writer);
    let file_options = SimpleFileOptions::default();
    let mut report = ArchiveReport::new(ArchiveType::Zip);

    for member in members {
        for walked in walk_member(root, member.as_ref(), options)? {
            if walked.is_dir || walked.name.is_empty() {
                continue;
            }

            zip.start_file(walked.name.as_str(), file_options)?;
            let mut source = File::open(&walked.path).map_err(|e| Error::AppendFailed {
                path: walked.path.clone(),
                source: e,
            })?;
            let size = io::copy(&mut source, &mut zip).map_err(|e| Error::AppendFailed {
                path: walked.path.clone(),
                source: e,
            })?;

            debug!(name = %walked.name, size, "added zip member");
            report.push(Entry::new(walked.name, size, EntryKind::File));
        }
    }

    let writer = zip.finish()?;
    Ok((writer, report))
}

/// Write a tar archive of `members`, directory entries included, through
/// the requested compressor.
pub fn create_tar<W, P>(
    writer: W,
    compression: Compression,
    root: &Path,
    members: &[P],
    options: &CreateOptions,
) -> Result<(W, ArchiveReport)>
where
    W: Write,
    P: AsRef<Path>,
{
    let encoder = compression.encoder(writer)?;
    let mut builder = tar::Builder::new(encoder);
    let mut report = ArchiveReport::new(ArchiveType::Tar(compression));

    for member in members {
        for walked in walk_member(root, member.as_ref(), options)? {
            // The walk root of "." has no name of its own.
            if walked.name.is_empty() {
                continue;
            }

            builder
                .append_path_with_name(&walked.path, &walked.name)
                .map_err(|e| Error::AppendFailed {
                    path: walked.path.clone(),
                    source: e,
                })?;

            let kind = if walked.is_dir {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            debug!(name = %walked.name, size = walked.size, "added tar member");
            report.push(Entry::new(walked.name, walked.size, kind));
        }
    }

    let encoder = builder.into_inner()?;
    let writer = encoder.finish()?;
    Ok((writer, report))
}
