//! Values returned across the loader boundary.

use std::path::PathBuf;

/// Outcome of loading one env file into an environment table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// File that was read; `None` when no file was found.
    pub path: Option<PathBuf>,
    /// Entries inserted into the table.
    pub applied: usize,
    /// Entries left alone because the key was already set.
    pub kept: usize,
    /// Malformed lines that were ignored.
    pub skipped: usize,
}

impl LoadSummary {
    /// Summary for a file that does not exist.
    pub fn not_found() -> Self {
        Self::default()
    }

    /// Returns `true` if a file was actually read.
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}
