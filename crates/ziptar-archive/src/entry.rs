use std::path::PathBuf;

use crate::format::ArchiveType;

/// One archive member touched by an operation.
#[derive(Clone, Debug)]
pub struct Entry {
    pub name: String,
    pub target_path: Option<PathBuf>,
    pub size: u64,
    pub kind: EntryKind,
}

impl Entry {
    pub fn new(name: String, size: u64, kind: EntryKind) -> Self {
        Self {
            name,
            target_path: None,
            size,
            kind,
        }
    }

    pub fn with_target_path(mut self, target_path: PathBuf) -> Self {
        self.target_path = Some(target_path);
        self
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File)
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Summary of a create, list or extract pass.
#[derive(Clone, Debug)]
pub struct ArchiveReport {
    pub archive: ArchiveType,
    pub entry_count: usize,
    pub total_bytes: u64,
    pub entries: Vec<Entry>,
    /// Member names that were not written because they have no usable target path.
    pub skipped: Vec<String>,
}

impl ArchiveReport {
    pub(crate) fn new(archive: ArchiveType) -> Self {
        Self {
            archive,
            entry_count: 0,
            total_bytes: 0,
            entries: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, entry: Entry) {
        self.entry_count += 1;
        self.total_bytes += entry.size;
        self.entries.push(entry);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }
}
