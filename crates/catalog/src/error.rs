use std::path::PathBuf;

use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while building the vocabulary
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A required input file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Corpus contained no tokens at all
    #[error("Corpus is empty")]
    EmptyCorpus,

    /// Corpus parsed into fewer distinct entries than the vocabulary needs
    #[error("Corpus yielded {found} distinct entries, expected at least {minimum} (truncated or malformed corpus?)")]
    CorpusTooSmall { found: usize, minimum: usize },
}

impl CatalogError {
    /// Create an IO error bound to the file that failed
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
