use std::path::PathBuf;

/// Errors from world state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// The ledger refuses to read or write the empty key.
    #[error("key must not be empty")]
    EmptyKey,

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The on-disk snapshot exists but cannot be decoded.
    #[error("corrupt snapshot {path}: {reason}")]
    CorruptSnapshot { path: PathBuf, reason: String },

    /// A lock guarding in-process state was poisoned by a panicking writer.
    #[error("state lock poisoned")]
    LockPoisoned,

    /// The backend is temporarily or permanently unable to serve requests.
    #[error("state unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for world state operations.
pub type StateResult<T> = Result<T, StateError>;
