use std::path::PathBuf;

/// Failures of the file-backed stores
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The file exists but its contents could not be decoded
    #[error("Could not decode {path:?}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not encode data for {path:?}: {reason}")]
    Encode { path: PathBuf, reason: String },

    /// A queued background save failed after the caller had moved on
    #[error("Background save #{generation} failed: {message}")]
    DeferredWrite { generation: u64, message: String },
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}
