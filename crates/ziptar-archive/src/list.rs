use std::io::{Read, Seek, Write};

use crate::entry::{ArchiveReport, Entry, EntryKind};
use crate::error::Result;
use crate::format::ArchiveType;

/// Print every member name of a zip archive, one per line, in archive order.
pub fn list_zip<R, O>(reader: R, out: &mut O) -> Result<ArchiveReport>
where
    R: Read + Seek,
    O: Write,
{
    let mut archive = zip::ZipArchive::new(reader)?;
    let mut report = ArchiveReport::new(ArchiveType::Zip);

    for i in 0..archive.len() {
        let file = archive.by_index(i)?;
        let name = file.name().to_owned();
        writeln!(out, "{name}")?;

        let kind = if file.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        report.push(Entry::new(name, file.size(), kind));
    }

    out.flush()?;
    Ok(report)
}
