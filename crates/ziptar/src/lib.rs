//! `tar`-style front end for creating, listing and extracting zip and tar
//! archives.
//!
//! `cli` turns the raw arguments into flags, `dispatch` validates them into
//! a [`Plan`] and runs it against [`ziptar_archive`].

pub mod cli;
pub mod dispatch;
pub mod stream;
mod error;

pub use dispatch::{Action, Outcome, Plan, execute, plan};
pub use error::{TableError, UsageError};
pub use stream::ArchiveStream;
