use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskdeckError {
    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("task already exists: {0}")]
    TaskExists(String),

    #[error("task id must not be empty")]
    EmptyTaskId,

    #[error("task {0} is already archived")]
    AlreadyArchived(String),

    #[error("task {0} is not archived")]
    NotArchived(String),

    #[error("failed to parse backlog yaml at {path}: {source}")]
    BacklogParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("status 'archived' is set by archiving a task, not by a direct status update")]
    DirectArchive,

    #[error("task {0} is archived; unarchive it before changing its status")]
    StatusWhileArchived(String),

    #[error("invalid priority: {0}")]
    InvalidPriority(String),

    #[error("invalid task type: {0}")]
    InvalidTaskType(String),

    #[error("worktree operation failed for task {id}: {message}")]
    Worktree { id: String, message: String },

    #[error("context unavailable for task {id}: {message}")]
    Context { id: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, TaskdeckError>;
