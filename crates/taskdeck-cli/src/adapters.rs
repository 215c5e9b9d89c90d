//! Concrete implementations of the core's capability seams.
//!
//! Worktrees are created by shelling out to `git worktree`; context comes
//! straight from the ticket folder. All calls block, one per CLI invocation.

use anyhow::{bail, Context as _};
use std::path::{Path, PathBuf};
use std::process::Command;
use taskdeck_core::capabilities::{ContextStore, WorktreeCreator, WorktreeRemover};
use taskdeck_core::manager::TaskManager;
use taskdeck_core::paths;
use tracing::{debug, warn};

/// Build a fully wired [`TaskManager`] rooted at `root`.
pub fn manager(root: &Path) -> TaskManager {
    TaskManager::new(
        root,
        Box::new(GitWorktrees::new(root.join("worktrees"))),
        Box::new(GitWorktrees::new(root.join("worktrees"))),
        Box::new(FsContextStore::new(root)),
    )
}

// ---------------------------------------------------------------------------
// GitWorktrees
// ---------------------------------------------------------------------------

/// Creates and removes git worktrees under a fixed base directory.
pub struct GitWorktrees {
    base: PathBuf,
}

impl GitWorktrees {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Worktree location for a task. Hierarchical IDs contain slashes, so
    /// the directory name flattens them.
    fn worktree_path(&self, task_id: &str) -> PathBuf {
        self.base.join(task_id.replace('/', "__"))
    }
}

impl WorktreeCreator for GitWorktrees {
    fn create_worktree(
        &self,
        repo: &Path,
        branch: &str,
        task_id: &str,
        base_branch: &str,
    ) -> anyhow::Result<PathBuf> {
        let path = self.worktree_path(task_id);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("failed to create worktrees dir")?;
        }

        let path_arg = path.to_string_lossy();
        let mut cmd = Command::new("git");
        cmd.current_dir(repo);
        if branch.is_empty() {
            cmd.args(["worktree", "add", "--detach", &path_arg, base_branch]);
        } else {
            cmd.args(["worktree", "add", "-b", branch, &path_arg, base_branch]);
        }

        let out = cmd
            .output()
            .with_context(|| format!("failed to run git in {}", repo.display()))?;
        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            bail!(
                "git worktree add failed in {}: {}",
                repo.display(),
                stderr.trim()
            );
        }
        debug!(path = %path.display(), task = task_id, "git worktree created");
        Ok(path)
    }
}

impl WorktreeRemover for GitWorktrees {
    fn remove_worktree(&self, worktree: &Path) -> anyhow::Result<()> {
        let wt = worktree.to_string_lossy();
        let out = Command::new("git")
            .args(["-C", &wt, "worktree", "remove", "--force", &wt])
            .output()
            .context("failed to run git worktree remove")?;

        if out.status.success() {
            debug!(path = %worktree.display(), "git worktree removed");
            return Ok(());
        }

        // Not every recorded path is still a registered worktree; fall back
        // to deleting the directory before giving up.
        let stderr = String::from_utf8_lossy(&out.stderr);
        warn!(
            path = %worktree.display(),
            err = %stderr.trim(),
            "git worktree remove failed, deleting directory"
        );
        std::fs::remove_dir_all(worktree)
            .with_context(|| format!("failed to remove worktree at {}", worktree.display()))
    }
}

// ---------------------------------------------------------------------------
// FsContextStore
// ---------------------------------------------------------------------------

/// Reads a task's `context.md` from its ticket folder, active or archived.
pub struct FsContextStore {
    root: PathBuf,
}

impl FsContextStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ContextStore for FsContextStore {
    fn load_context(&self, task_id: &str) -> anyhow::Result<String> {
        let ticket = paths::resolve_ticket_dir(&self.root, task_id);
        let path = paths::ticket_context_path(&ticket);
        std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read context at {}", path.display()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
