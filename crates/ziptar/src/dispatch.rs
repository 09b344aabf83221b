use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Cursor, Read, Seek, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;
use ziptar_archive::{
    ArchiveReport, ArchiveType, Compression, CreateOptions, create_tar, create_zip, extract_zip,
    list_zip,
};

use crate::cli::{Flag, ParsedOptions};
use crate::error::UsageError;
use crate::stream::{ArchiveReader, ArchiveStream};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Create,
    Extract,
    List,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("create"),
            Self::Extract => f.write_str("extract"),
            Self::List => f.write_str("list"),
        }
    }
}

/// A fully validated invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    pub action: Action,
    pub archive: ArchiveType,
    pub stream: ArchiveStream,
    pub members: Vec<PathBuf>,
}

#[derive(Debug)]
pub enum Outcome {
    Done(ArchiveReport),
    /// The action exists but has no implementation for this archive type.
    Unsupported {
        action: Action,
        archive: ArchiveType,
    },
}

/// Validate the flag combination and resolve the archive stream.
pub fn plan(options: &ParsedOptions, args: Vec<String>) -> Result<Plan, UsageError> {
    let gzip = options.contains(Flag::Gzip);
    let bzip = options.contains(Flag::Bzip);
    if gzip && bzip {
        return Err(UsageError::CompressionConflict);
    }

    let actions: Vec<Action> = [
        (Flag::Create, Action::Create),
        (Flag::Extract, Action::Extract),
        (Flag::List, Action::List),
    ]
    .into_iter()
    .filter(|(flag, _)| options.contains(*flag))
    .map(|(_, action)| action)
    .collect();
    let action = match actions.as_slice() {
        [action] => *action,
        [] => return Err(UsageError::MissingAction),
        _ => return Err(UsageError::MultipleActions),
    };

    let mut args = args.into_iter();
    let stream = if options.contains(Flag::File) {
        let path = args.next().ok_or(UsageError::MissingArchivePath)?;
        ArchiveStream::File(PathBuf::from(path))
    } else {
        ArchiveStream::Standard
    };
    let members: Vec<PathBuf> = args.map(PathBuf::from).collect();

    let archive = if options.contains(Flag::Zip) {
        if gzip || bzip {
            return Err(UsageError::CompressionWithZip);
        }
        ArchiveType::Zip
    } else if gzip {
        ArchiveType::Tar(Compression::Gzip)
    } else if bzip {
        ArchiveType::Tar(Compression::Bzip2)
    } else {
        ArchiveType::Tar(Compression::None)
    };

    match action {
        Action::Extract if !members.is_empty() => Err(UsageError::UnexpectedExtractArguments),
        Action::List if !members.is_empty() => Err(UsageError::UnexpectedListArguments),
        Action::Create if members.is_empty() => Err(UsageError::EmptyArchive),
        _ => Ok(Plan {
            action,
            archive,
            stream,
            members,
        }),
    }
}

/// Run `plan`. Relative archive and member paths resolve against
/// `workdir`, which is also the extraction root.
pub fn execute<R: Read, W: Write>(
    plan: &Plan,
    workdir: &Path,
    stdin: R,
    mut stdout: W,
) -> anyhow::Result<Outcome> {
    let report = match (plan.action, plan.archive) {
        (Action::Create, archive) => create(plan, archive, workdir, &mut stdout)?,
        (Action::List, ArchiveType::Zip) => {
            let reader = ArchiveReader::open(&plan.stream, workdir, stdin)?;
            list_zip(reader, &mut stdout)?
        }
        (Action::Extract, ArchiveType::Zip) => {
            let reader = ArchiveReader::open(&plan.stream, workdir, stdin)?;
            extract_zip(reader, workdir)?
        }
        (action @ (Action::List | Action::Extract), archive @ ArchiveType::Tar(_)) => {
            return Ok(Outcome::Unsupported { action, archive });
        }
    };

    info!(
        action = %plan.action,
        archive = %report.archive,
        entries = report.entry_count,
        bytes = report.total_bytes,
        skipped = report.skipped.len(),
        "finished"
    );
    Ok(Outcome::Done(report))
}

fn create<W: Write>(
    plan: &Plan,
    archive: ArchiveType,
    workdir: &Path,
    stdout: &mut W,
) -> anyhow::Result<ArchiveReport> {
    match (&plan.stream, archive) {
        (ArchiveStream::File(path), _) => {
            let path = workdir.join(path);
            let file = File::create(&path)
                .with_context(|| format!("failed to create archive '{}'", path.display()))?;
            // The archive may sit inside one of the walked members.
            let canonical = path
                .canonicalize()
                .with_context(|| format!("failed to resolve archive '{}'", path.display()))?;
            let options = CreateOptions::default().exclude(canonical);
            let (mut writer, report) = write_archive(
                archive,
                BufWriter::new(file),
                workdir,
                &plan.members,
                &options,
            )?;
            writer.flush()?;
            Ok(report)
        }
        // Zip writes its central directory by seeking back, so build it in memory.
        (ArchiveStream::Standard, ArchiveType::Zip) => {
            let (buffer, report) = create_zip(
                Cursor::new(Vec::new()),
                workdir,
                &plan.members,
                &CreateOptions::default(),
            )?;
            stdout.write_all(buffer.get_ref())?;
            stdout.flush()?;
            Ok(report)
        }
        (ArchiveStream::Standard, ArchiveType::Tar(compression)) => {
            let (_, report) = create_tar(
                &mut *stdout,
                compression,
                workdir,
                &plan.members,
                &CreateOptions::default(),
            )?;
            stdout.flush()?;
            Ok(report)
        }
    }
}

fn write_archive<W: Write + Seek>(
    archive: ArchiveType,
    writer: W,
    root: &Path,
    members: &[PathBuf],
    options: &CreateOptions,
) -> ziptar_archive::Result<(W, ArchiveReport)> {
    match archive {
        ArchiveType::Zip => create_zip(writer, root, members, options),
        ArchiveType::Tar(compression) => create_tar(writer, compression, root, members, options),
    }
}
