use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default)]
pub struct CreateOptions {
    /// Canonical path of a file the walk must not add, usually the archive
    /// being written.
    pub exclude: Option<PathBuf>,
}

impl CreateOptions {
    pub fn exclude(mut self, path: impl Into<PathBuf>) -> Self {
        self.exclude = Some(path.into());
        self
    }

    pub(crate) fn is_excluded(&self, path: &Path) -> bool {
        self.exclude
            .as_deref()
            .is_some_and(|excluded| path.canonicalize().is_ok_and(|p| p == excluded))
    }
}
