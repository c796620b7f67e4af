// Error type for the catalog library.

use std::path::PathBuf;

/// Errors surfaced by the catalog store. None of them are fatal to the
/// menu loop; the UI reports them and carries on.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The year field could not be parsed as an integer.
    #[error("invalid year {input:?}")]
    InvalidYear { input: String },

    /// Reading or writing the backing file failed.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
