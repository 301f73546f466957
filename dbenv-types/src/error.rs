//! Error types for env file loading.

use std::path::PathBuf;

/// Loader errors.
///
/// A missing file and malformed lines are not errors; only a failure to
/// read a file that exists is reported.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read env file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
