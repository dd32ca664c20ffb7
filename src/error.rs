//! Error types shared by the board, the snapshot codec and the stores.

use thiserror::Error;

/// A stage name that is not one of the four pipeline stages.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid stage: {0}")]
pub struct InvalidStageError(pub String);

/// A task record whose stage does not map to any lane of the board.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid stage group: {0}")]
pub struct UnknownStageGroupError(pub String);

/// Failures of the durable key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Snapshot encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Unavailable(String),
}

/// Everything a board operation can propagate to the calling collaborator.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error(transparent)]
    InvalidStage(#[from] InvalidStageError),

    #[error(transparent)]
    UnknownStageGroup(#[from] UnknownStageGroupError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type BoardResult<T> = Result<T, BoardError>;
