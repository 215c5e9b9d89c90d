use crate::capabilities::WorktreeCreator;
use crate::error::Result;
use crate::idgen::TaskIdGenerator;
use crate::types::TaskType;
use crate::{io, paths, templates};
use std::path::PathBuf;

/// Default prefix for sequential IDs.
pub const DEFAULT_ID_PREFIX: &str = "TASK";

// ---------------------------------------------------------------------------
// TicketSpec / IdSpec / WorktreeSpec
// ---------------------------------------------------------------------------

/// How the new task's ID is chosen.
#[derive(Debug, Clone)]
pub enum IdSpec {
    /// Allocate the next sequential ID with this prefix.
    Prefix(String),
    /// Caller-supplied ID, used verbatim. Typically a hierarchical path like
    /// `github.com/org/repo/feature`; uniqueness is the caller's contract.
    Explicit(String),
}

impl Default for IdSpec {
    fn default() -> Self {
        IdSpec::Prefix(DEFAULT_ID_PREFIX.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct WorktreeSpec {
    pub repo: PathBuf,
    /// Never validated; passed to the creator verbatim.
    pub branch: String,
    pub base_branch: String,
}

#[derive(Debug, Clone)]
pub struct TicketSpec {
    pub task_type: TaskType,
    pub title: String,
    pub id: IdSpec,
    pub worktree: Option<WorktreeSpec>,
}

// ---------------------------------------------------------------------------
// TicketBootstrap
// ---------------------------------------------------------------------------

/// Result of a bootstrap: the ticket always exists; the worktree may not.
#[derive(Debug)]
pub struct TicketBootstrap {
    pub id: String,
    pub ticket_dir: PathBuf,
    pub worktree: Option<PathBuf>,
    /// Set when worktree creation was requested and failed. The ticket is
    /// not rolled back; the registry entry simply omits a worktree path.
    pub worktree_error: Option<anyhow::Error>,
}

// ---------------------------------------------------------------------------
// BootstrapSystem
// ---------------------------------------------------------------------------

/// Composes ID allocation, ticket materialization, and optional worktree
/// creation into one new-task operation.
pub struct BootstrapSystem {
    root: PathBuf,
    idgen: TaskIdGenerator,
    worktrees: Box<dyn WorktreeCreator>,
}

impl BootstrapSystem {
    pub fn new(root: impl Into<PathBuf>, worktrees: Box<dyn WorktreeCreator>) -> Self {
        let root = root.into();
        let idgen = TaskIdGenerator::new(paths::counter_path(&root));
        Self {
            root,
            idgen,
            worktrees,
        }
    }

    /// Allocate an ID, materialize the ticket directory, and (if requested)
    /// create a worktree. Worktree failure leaves the ticket in place and is
    /// reported through [`TicketBootstrap::worktree_error`].
    pub fn create_ticket(&self, spec: &TicketSpec) -> Result<TicketBootstrap> {
        let id = match &spec.id {
            IdSpec::Prefix(prefix) => self.idgen.next(prefix)?,
            IdSpec::Explicit(id) => id.clone(),
        };

        let ticket_dir = paths::active_ticket_dir(&self.root, &id);
        self.materialize(&ticket_dir, &id, spec)?;

        let (worktree, worktree_error) = match &spec.worktree {
            Some(wt) => {
                match self
                    .worktrees
                    .create_worktree(&wt.repo, &wt.branch, &id, &wt.base_branch)
                {
                    Ok(path) => (Some(path), None),
                    Err(e) => (None, Some(e)),
                }
            }
            None => (None, None),
        };

        Ok(TicketBootstrap {
            id,
            ticket_dir,
            worktree,
            worktree_error,
        })
    }

    fn materialize(&self, ticket_dir: &std::path::Path, id: &str, spec: &TicketSpec) -> Result<()> {
        io::ensure_dir(ticket_dir)?;
        io::ensure_dir(&ticket_dir.join(paths::COMMUNICATIONS_DIR))?;

        io::write_if_missing(
            &ticket_dir.join(paths::STATUS_FILE),
            templates::status_yaml(id, spec.task_type).as_bytes(),
        )?;
        io::write_if_missing(
            &ticket_dir.join(paths::CONTEXT_FILE),
            templates::context_md(spec.task_type, id, &spec.title).as_bytes(),
        )?;
        io::write_if_missing(
            &ticket_dir.join(paths::NOTES_FILE),
            templates::notes_md(id).as_bytes(),
        )?;
        io::write_if_missing(
            &ticket_dir.join(paths::DESIGN_FILE),
            templates::design_md(spec.task_type, id).as_bytes(),
        )?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
