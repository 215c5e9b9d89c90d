//! Capability seams owned by external collaborators.
//!
//! The lifecycle core never shells out to git or reads context files itself;
//! concrete implementations are injected at construction.

use std::path::{Path, PathBuf};

/// Creates an isolated working directory bound to a task's branch.
pub trait WorktreeCreator {
    /// Returns the path of the new worktree. Branch names are passed through
    /// verbatim; the implementation decides what git accepts.
    fn create_worktree(
        &self,
        repo: &Path,
        branch: &str,
        task_id: &str,
        base_branch: &str,
    ) -> anyhow::Result<PathBuf>;
}

/// Removes a task's worktree.
pub trait WorktreeRemover {
    fn remove_worktree(&self, worktree: &Path) -> anyhow::Result<()>;
}

/// Loads a task's accumulated context document.
pub trait ContextStore {
    fn load_context(&self, task_id: &str) -> anyhow::Result<String>;
}
