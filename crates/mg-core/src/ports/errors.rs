use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageFetchError {
    #[error("page resource not found: {0}")]
    NotFound(String),

    #[error("unexpected HTTP status {status} for {path}")]
    Status { status: u16, path: String },

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed page resource {path}: {reason}")]
    Malformed { path: String, reason: String },

    #[error("i/o failure: {0}")]
    Io(String),
}

#[derive(Debug, Error)]
pub enum SnapshotStoreError {
    #[error("snapshot store unavailable: {0}")]
    Unavailable(String),

    #[error("snapshot store rejected write: {0}")]
    Write(String),
}
