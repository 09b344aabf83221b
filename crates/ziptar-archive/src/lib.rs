//! ZIP and TAR archive operations with member path normalization.
//!
//! # Architecture
//!
//! - `sanitize.rs` - Member name normalization (zip-slip prevention)
//! - `format.rs` - Archive type tag and tar compressors
//! - `create.rs` - Zip and tar creation from filesystem paths
//! - `list.rs` - Member listing
//! - `extract.rs` - Zip extraction
//! - `entry.rs` - Per-member records and operation reports

pub use create::{create_tar, create_zip};
pub use entry::{ArchiveReport, Entry, EntryKind};
pub use error::{Error, Result};
pub use extract::extract_zip;
pub use format::{ArchiveType, Compression};
pub use list::list_zip;
pub use options::CreateOptions;

mod create;
pub mod entry;
mod error;
mod extract;
pub mod format;
mod list;
pub mod options;
mod sanitize;
