use crate::backlog::{BacklogStore, TaskFilter};
use crate::bootstrap::{BootstrapSystem, IdSpec, TicketSpec, WorktreeSpec};
use crate::capabilities::{ContextStore, WorktreeCreator, WorktreeRemover};
use crate::entry::{TaskEntry, TaskPatch};
use crate::error::{Result, TaskdeckError};
use crate::paths;
use crate::types::{Priority, TaskStatus, TaskType};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// CreateTaskOptions / CreateOutcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct CreateTaskOptions {
    /// Title for the registry entry; defaults to the allocated ID.
    pub title: Option<String>,
    /// Sequential prefix or caller-supplied hierarchical ID.
    pub id: Option<IdSpec>,
    /// Base branch for the worktree; defaults to `main`.
    pub base_branch: Option<String>,
    pub priority: Option<Priority>,
    pub owner: Option<String>,
    pub tags: Vec<String>,
    pub blocked_by: Vec<String>,
    pub related: Vec<String>,
    pub source: Option<String>,
}

/// Outcome of task creation. The task always exists; a requested worktree
/// may have failed, in which case the entry omits a worktree path and the
/// failure is carried here for the caller to report.
#[derive(Debug)]
pub struct CreateOutcome {
    pub task: TaskEntry,
    pub worktree_error: Option<anyhow::Error>,
}

// ---------------------------------------------------------------------------
// TaskManager
// ---------------------------------------------------------------------------

/// Top-level orchestrator for the task lifecycle state machine.
///
/// Composes the bootstrap system, the YAML backlog registry, and the two
/// injected capability seams (worktree removal, context loading). One CLI
/// invocation performs one operation to completion: each mutating operation
/// loads `backlog.yaml`, applies its change, and writes the whole document
/// back atomically.
pub struct TaskManager {
    root: PathBuf,
    bootstrap: BootstrapSystem,
    worktree_remover: Box<dyn WorktreeRemover>,
    context: Box<dyn ContextStore>,
}

impl TaskManager {
    pub fn new(
        root: impl Into<PathBuf>,
        worktree_creator: Box<dyn WorktreeCreator>,
        worktree_remover: Box<dyn WorktreeRemover>,
        context: Box<dyn ContextStore>,
    ) -> Self {
        let root = root.into();
        let bootstrap = BootstrapSystem::new(&root, worktree_creator);
        Self {
            root,
            bootstrap,
            worktree_remover,
            context,
        }
    }

    fn load_store(&self) -> Result<BacklogStore> {
        BacklogStore::load(paths::backlog_path(&self.root))
    }

    // ---------------------------------------------------------------------------
    // Creation
    // ---------------------------------------------------------------------------

    /// Bootstrap a new task: allocate an ID, materialize the ticket folder,
    /// optionally create a worktree, and register the entry with status
    /// `backlog`.
    pub fn create_task(
        &self,
        task_type: TaskType,
        branch: &str,
        repo: Option<&Path>,
        opts: CreateTaskOptions,
    ) -> Result<CreateOutcome> {
        let mut store = self.load_store()?;

        let id_spec = opts.id.unwrap_or_default();
        // Explicit IDs are the caller's namespace, but a duplicate must be
        // rejected before any ticket files land on disk.
        if let IdSpec::Explicit(id) = &id_spec {
            if id.is_empty() {
                return Err(TaskdeckError::EmptyTaskId);
            }
            if store.contains(id) {
                return Err(TaskdeckError::TaskExists(id.clone()));
            }
        }

        let worktree_spec = repo.map(|repo| WorktreeSpec {
            repo: repo.to_path_buf(),
            branch: branch.to_string(),
            base_branch: opts.base_branch.clone().unwrap_or_else(|| "main".to_string()),
        });

        let ticket_spec = TicketSpec {
            task_type,
            title: opts.title.clone().unwrap_or_default(),
            id: id_spec,
            worktree: worktree_spec,
        };
        let boot = self.bootstrap.create_ticket(&ticket_spec)?;

        let mut entry = TaskEntry::new(
            boot.id.clone(),
            opts.title.unwrap_or_else(|| boot.id.clone()),
            task_type,
            boot.ticket_dir.clone(),
        );
        entry.branch = branch.to_string();
        entry.repo = repo.map(|p| p.to_string_lossy().into_owned());
        entry.worktree = boot.worktree;
        entry.priority = opts.priority.unwrap_or_default();
        entry.owner = opts.owner;
        entry.tags = opts.tags;
        entry.blocked_by = opts.blocked_by;
        entry.related = opts.related;
        entry.source = opts.source;

        store.add(entry.clone())?;
        store.save()?;

        Ok(CreateOutcome {
            task: entry,
            worktree_error: boot.worktree_error,
        })
    }

    // ---------------------------------------------------------------------------
    // Status transitions
    // ---------------------------------------------------------------------------

    /// Mark a task in progress. Idempotent if it already is. Archived tasks
    /// must be unarchived first.
    pub fn resume_task(&self, id: &str) -> Result<TaskEntry> {
        let mut store = self.load_store()?;
        let current = store.get(id)?.status;
        if current == TaskStatus::InProgress {
            return Ok(store.get(id)?.clone());
        }
        if current == TaskStatus::Archived {
            return Err(TaskdeckError::StatusWhileArchived(id.to_string()));
        }
        let patch = TaskPatch {
            status: Some(TaskStatus::InProgress),
            ..Default::default()
        };
        let updated = store.update(id, patch)?.clone();
        store.save()?;
        Ok(updated)
    }

    /// Direct status set. `archived` is rejected here; it is only reachable
    /// through [`archive_task`](Self::archive_task). The reverse direction is
    /// guarded too: an archived task keeps its `previous_status` record and
    /// its relocated ticket folder, so it only leaves the archived state
    /// through [`unarchive_task`](Self::unarchive_task).
    pub fn update_task_status(&self, id: &str, status: TaskStatus) -> Result<TaskEntry> {
        if status == TaskStatus::Archived {
            return Err(TaskdeckError::DirectArchive);
        }
        let mut store = self.load_store()?;
        if store.get(id)?.status == TaskStatus::Archived {
            return Err(TaskdeckError::StatusWhileArchived(id.to_string()));
        }
        let patch = TaskPatch {
            status: Some(status),
            ..Default::default()
        };
        let updated = store.update(id, patch)?.clone();
        store.save()?;
        Ok(updated)
    }

    // ---------------------------------------------------------------------------
    // Archive / unarchive
    // ---------------------------------------------------------------------------

    /// Archive a task: record its current status, relocate the ticket folder
    /// under `tickets/_archived/`, and flip the registry status.
    ///
    /// The directory moves first, then the registry is updated and saved.
    /// The registry value is authoritative: a stray directory left by a
    /// crash between the two steps is a known out-of-band inconsistency and
    /// is not reconciled automatically.
    pub fn archive_task(&self, id: &str) -> Result<TaskEntry> {
        let mut store = self.load_store()?;
        let current = store.get(id)?.status;
        if current == TaskStatus::Archived {
            return Err(TaskdeckError::AlreadyArchived(id.to_string()));
        }

        self.move_ticket_dir(
            &paths::active_ticket_dir(&self.root, id),
            &paths::archived_ticket_dir(&self.root, id),
        )?;

        let patch = TaskPatch {
            status: Some(TaskStatus::Archived),
            previous_status: Some(Some(current)),
            ticket: Some(paths::archived_ticket_dir(&self.root, id)),
            ..Default::default()
        };
        let updated = store.update(id, patch)?.clone();
        store.save()?;
        Ok(updated)
    }

    /// Restore an archived task to the exact status it held before
    /// archiving and move its ticket folder back to the active location.
    pub fn unarchive_task(&self, id: &str) -> Result<TaskEntry> {
        let mut store = self.load_store()?;
        let entry = store.get(id)?;
        if entry.status != TaskStatus::Archived {
            return Err(TaskdeckError::NotArchived(id.to_string()));
        }
        // Hand-edited registries may lack the record; backlog is the only
        // sensible restore point then.
        let restored = entry.previous_status.unwrap_or(TaskStatus::Backlog);

        self.move_ticket_dir(
            &paths::archived_ticket_dir(&self.root, id),
            &paths::active_ticket_dir(&self.root, id),
        )?;

        let patch = TaskPatch {
            status: Some(restored),
            previous_status: Some(None),
            ticket: Some(paths::active_ticket_dir(&self.root, id)),
            ..Default::default()
        };
        let updated = store.update(id, patch)?.clone();
        store.save()?;
        Ok(updated)
    }

    /// Move a ticket folder between the active and archived locations.
    /// A missing source is tolerated: the registry drives lifecycle state,
    /// and the folder may already sit where it belongs.
    fn move_ticket_dir(&self, from: &Path, to: &Path) -> Result<()> {
        if !from.is_dir() {
            return Ok(());
        }
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::rename(from, to)?;
        Ok(())
    }

    // ---------------------------------------------------------------------------
    // Priorities
    // ---------------------------------------------------------------------------

    pub fn update_task_priority(&self, id: &str, priority: Priority) -> Result<TaskEntry> {
        let mut store = self.load_store()?;
        let patch = TaskPatch {
            priority: Some(priority),
            ..Default::default()
        };
        let updated = store.update(id, patch)?.clone();
        store.save()?;
        Ok(updated)
    }

    /// Assign priorities by list position: P0..P3 for the first four IDs,
    /// P3 for everything after. All-or-nothing: an unknown ID fails the
    /// whole call before any priority changes.
    pub fn reorder_priorities(&self, ids: &[String]) -> Result<()> {
        let mut store = self.load_store()?;
        for id in ids {
            if !store.contains(id) {
                return Err(TaskdeckError::TaskNotFound(id.clone()));
            }
        }
        for (position, id) in ids.iter().enumerate() {
            let patch = TaskPatch {
                priority: Some(Priority::for_position(position)),
                ..Default::default()
            };
            store.update(id, patch)?;
        }
        store.save()
    }

    // ---------------------------------------------------------------------------
    // Worktree cleanup
    // ---------------------------------------------------------------------------

    /// Remove the task's recorded worktree and clear it from the registry.
    /// No recorded worktree, or one already gone from disk, is a no-op;
    /// genuine removal failures propagate.
    pub fn cleanup_worktree(&self, id: &str) -> Result<()> {
        let mut store = self.load_store()?;
        let Some(worktree) = store.get(id)?.worktree.clone() else {
            return Ok(());
        };

        if worktree.exists() {
            self.worktree_remover
                .remove_worktree(&worktree)
                .map_err(|e| TaskdeckError::Worktree {
                    id: id.to_string(),
                    message: format!("{e:#}"),
                })?;
        }

        let patch = TaskPatch {
            worktree: Some(None),
            ..Default::default()
        };
        store.update(id, patch)?;
        store.save()
    }

    // ---------------------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------------------

    pub fn get_task(&self, id: &str) -> Result<TaskEntry> {
        Ok(self.load_store()?.get(id)?.clone())
    }

    pub fn all_tasks(&self) -> Result<Vec<TaskEntry>> {
        Ok(self.load_store()?.all().into_iter().cloned().collect())
    }

    pub fn tasks_by_status(&self, status: TaskStatus) -> Result<Vec<TaskEntry>> {
        let filter = TaskFilter {
            status: Some(status),
            ..Default::default()
        };
        self.filter_tasks(&filter)
    }

    pub fn filter_tasks(&self, filter: &TaskFilter) -> Result<Vec<TaskEntry>> {
        Ok(self
            .load_store()?
            .filter(filter)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Load the task's context document through the injected store.
    pub fn task_context(&self, id: &str) -> Result<String> {
        // NotFound beats a confusing adapter error for absent IDs.
        self.load_store()?.get(id)?;
        self.context
            .load_context(id)
            .map_err(|e| TaskdeckError::Context {
                id: id.to_string(),
                message: format!("{e:#}"),
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct FakeCreator {
        base: PathBuf,
        fail: bool,
    }

    impl WorktreeCreator for FakeCreator {
        fn create_worktree(
            &self,
            _repo: &Path,
            _branch: &str,
            task_id: &str,
            _base_branch: &str,
        ) -> anyhow::Result<PathBuf> {
            if self.fail {
                anyhow::bail!("worktree add failed");
            }
            let path = self.base.join(task_id.replace('/', "_"));
            std::fs::create_dir_all(&path)?;
            Ok(path)
        }
    }

    #[derive(Default)]
    struct FakeRemover {
        removed: Mutex<Vec<PathBuf>>,
        fail: bool,
    }

    impl WorktreeRemover for &'static FakeRemover {
        fn remove_worktree(&self, worktree: &Path) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("worktree remove failed");
            }
            std::fs::remove_dir_all(worktree)?;
            self.removed.lock().unwrap().push(worktree.to_path_buf());
            Ok(())
        }
    }

    struct FakeContext;

    impl ContextStore for FakeContext {
        fn load_context(&self, task_id: &str) -> anyhow::Result<String> {
            Ok(format!("context for {task_id}"))
        }
    }

    fn manager(dir: &TempDir) -> TaskManager {
        TaskManager::new(
            dir.path(),
            Box::new(FakeCreator {
                base: dir.path().join("worktrees"),
                fail: false,
            }),
            Box::new(leaked_remover(false)),
            Box::new(FakeContext),
        )
    }

    fn leaked_remover(fail: bool) -> &'static FakeRemover {
        Box::leak(Box::new(FakeRemover {
            removed: Mutex::new(Vec::new()),
            fail,
        }))
    }

    #[test]
    fn create_task_materializes_ticket() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);

        let out = mgr
            .create_task(TaskType::Feat, "feat/login", None, CreateTaskOptions::default())
            .unwrap();
        assert_eq!(out.task.id, "TASK-00001");
        assert_eq!(out.task.status, TaskStatus::Backlog);
        assert!(out.worktree_error.is_none());

        let ticket = paths::active_ticket_dir(dir.path(), &out.task.id);
        for file in ["status.yaml", "context.md", "notes.md", "design.md"] {
            assert!(ticket.join(file).is_file(), "missing {file}");
        }
        assert!(ticket.join("communications").is_dir());
    }

    #[test]
    fn create_task_ids_are_unique() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..5 {
            let out = mgr
                .create_task(TaskType::Bug, "b", None, CreateTaskOptions::default())
                .unwrap();
            assert!(!out.task.id.is_empty());
            assert!(seen.insert(out.task.id));
        }
    }

    #[test]
    fn create_task_with_worktree() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);
        let repo = dir.path().join("repo");

        let out = mgr
            .create_task(TaskType::Feat, "feat/x", Some(&repo), CreateTaskOptions::default())
            .unwrap();
        let wt = out.task.worktree.as_ref().unwrap();
        assert!(wt.is_dir());
        assert_eq!(out.task.repo.as_deref(), Some(repo.to_str().unwrap()));
    }

    #[test]
    fn worktree_failure_leaves_task_without_worktree() {
        let dir = TempDir::new().unwrap();
        let mgr = TaskManager::new(
            dir.path(),
            Box::new(FakeCreator {
                base: dir.path().join("worktrees"),
                fail: true,
            }),
            Box::new(leaked_remover(false)),
            Box::new(FakeContext),
        );
        let repo = dir.path().join("repo");

        let out = mgr
            .create_task(TaskType::Feat, "feat/x", Some(&repo), CreateTaskOptions::default())
            .unwrap();
        assert!(out.task.worktree.is_none());
        assert!(out.worktree_error.is_some());
        // The ticket and registry entry still exist.
        assert!(out.task.ticket.join("status.yaml").is_file());
        assert_eq!(mgr.get_task(&out.task.id).unwrap().id, out.task.id);
    }

    #[test]
    fn unusual_branch_names_round_trip() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);
        let long = "b".repeat(220);
        for branch in ["", "with spaces", "emoji 🚀 branch", long.as_str()] {
            let out = mgr
                .create_task(TaskType::Feat, branch, None, CreateTaskOptions::default())
                .unwrap();
            assert_eq!(mgr.get_task(&out.task.id).unwrap().branch, branch);
        }
    }

    #[test]
    fn explicit_hierarchical_id() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);
        let opts = CreateTaskOptions {
            id: Some(IdSpec::Explicit("github.com/org/repo/feature".to_string())),
            ..Default::default()
        };
        let out = mgr.create_task(TaskType::Feat, "f", None, opts).unwrap();
        assert_eq!(out.task.id, "github.com/org/repo/feature");

        // Duplicate explicit ID is rejected before touching disk again.
        let opts = CreateTaskOptions {
            id: Some(IdSpec::Explicit("github.com/org/repo/feature".to_string())),
            ..Default::default()
        };
        let err = mgr.create_task(TaskType::Feat, "f", None, opts).unwrap_err();
        assert!(matches!(err, TaskdeckError::TaskExists(_)));
    }

    #[test]
    fn resume_sets_in_progress_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);
        let id = mgr
            .create_task(TaskType::Feat, "x", None, CreateTaskOptions::default())
            .unwrap()
            .task
            .id;

        assert_eq!(mgr.resume_task(&id).unwrap().status, TaskStatus::InProgress);
        assert_eq!(mgr.resume_task(&id).unwrap().status, TaskStatus::InProgress);
    }

    #[test]
    fn resume_unknown_task_not_found() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);
        let err = mgr.resume_task("TASK-09999").unwrap_err();
        assert!(matches!(err, TaskdeckError::TaskNotFound(id) if id == "TASK-09999"));
    }

    #[test]
    fn direct_archived_status_rejected() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);
        let id = mgr
            .create_task(TaskType::Feat, "x", None, CreateTaskOptions::default())
            .unwrap()
            .task
            .id;
        let err = mgr.update_task_status(&id, TaskStatus::Archived).unwrap_err();
        assert!(matches!(err, TaskdeckError::DirectArchive));
        assert_eq!(mgr.get_task(&id).unwrap().status, TaskStatus::Backlog);
    }

    #[test]
    fn archived_task_only_leaves_through_unarchive() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);
        let id = mgr
            .create_task(TaskType::Feat, "x", None, CreateTaskOptions::default())
            .unwrap()
            .task
            .id;
        mgr.resume_task(&id).unwrap();
        mgr.archive_task(&id).unwrap();

        let err = mgr.update_task_status(&id, TaskStatus::Review).unwrap_err();
        assert!(matches!(err, TaskdeckError::StatusWhileArchived(_)));
        let err = mgr.resume_task(&id).unwrap_err();
        assert!(matches!(err, TaskdeckError::StatusWhileArchived(_)));

        // Archived state is intact: restore record kept, folder still
        // under the archive.
        let task = mgr.get_task(&id).unwrap();
        assert_eq!(task.status, TaskStatus::Archived);
        assert_eq!(task.previous_status, Some(TaskStatus::InProgress));
        assert!(!paths::active_ticket_dir(dir.path(), &id).exists());
        assert!(paths::archived_ticket_dir(dir.path(), &id).is_dir());

        // Unarchive remains the one way out.
        assert_eq!(mgr.unarchive_task(&id).unwrap().status, TaskStatus::InProgress);
    }

    #[test]
    fn archive_moves_dir_and_records_previous_status() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);
        let id = mgr
            .create_task(TaskType::Feat, "x", None, CreateTaskOptions::default())
            .unwrap()
            .task
            .id;
        mgr.resume_task(&id).unwrap();

        let archived = mgr.archive_task(&id).unwrap();
        assert_eq!(archived.status, TaskStatus::Archived);
        assert_eq!(archived.previous_status, Some(TaskStatus::InProgress));
        assert!(!paths::active_ticket_dir(dir.path(), &id).exists());
        assert!(paths::archived_ticket_dir(dir.path(), &id)
            .join("status.yaml")
            .is_file());
        assert_eq!(
            paths::resolve_ticket_dir(dir.path(), &id),
            paths::archived_ticket_dir(dir.path(), &id)
        );
    }

    #[test]
    fn archive_twice_says_already_archived() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);
        let id = mgr
            .create_task(TaskType::Feat, "x", None, CreateTaskOptions::default())
            .unwrap()
            .task
            .id;
        mgr.archive_task(&id).unwrap();
        let err = mgr.archive_task(&id).unwrap_err();
        assert!(err.to_string().contains("already archived"), "{err}");
    }

    #[test]
    fn unarchive_non_archived_says_not_archived() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);
        let id = mgr
            .create_task(TaskType::Feat, "x", None, CreateTaskOptions::default())
            .unwrap()
            .task
            .id;
        let err = mgr.unarchive_task(&id).unwrap_err();
        assert!(err.to_string().contains("not archived"), "{err}");
    }

    #[test]
    fn unarchive_restores_exact_previous_status() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);

        for status in [
            TaskStatus::Backlog,
            TaskStatus::InProgress,
            TaskStatus::Blocked,
            TaskStatus::Review,
            TaskStatus::Done,
        ] {
            let id = mgr
                .create_task(TaskType::Feat, "x", None, CreateTaskOptions::default())
                .unwrap()
                .task
                .id;
            if status != TaskStatus::Backlog {
                mgr.update_task_status(&id, status).unwrap();
            }
            mgr.archive_task(&id).unwrap();

            let restored = mgr.unarchive_task(&id).unwrap();
            assert_eq!(restored.status, status);
            assert!(restored.previous_status.is_none());
            assert!(paths::active_ticket_dir(dir.path(), &id)
                .join("status.yaml")
                .is_file());
        }
    }

    #[test]
    fn archive_unarchive_scenario() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);
        let id = mgr
            .create_task(TaskType::Feat, "x", None, CreateTaskOptions::default())
            .unwrap()
            .task
            .id;
        assert_eq!(mgr.get_task(&id).unwrap().status, TaskStatus::Backlog);

        mgr.resume_task(&id).unwrap();
        let archived = mgr.archive_task(&id).unwrap();
        assert_eq!(archived.previous_status, Some(TaskStatus::InProgress));

        let restored = mgr.unarchive_task(&id).unwrap();
        assert_eq!(restored.status, TaskStatus::InProgress);
    }

    #[test]
    fn reorder_priorities_by_position() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);
        let ids: Vec<String> = (0..6)
            .map(|_| {
                mgr.create_task(TaskType::Feat, "x", None, CreateTaskOptions::default())
                    .unwrap()
                    .task
                    .id
            })
            .collect();

        mgr.reorder_priorities(&ids).unwrap();
        let got: Vec<Priority> = ids
            .iter()
            .map(|id| mgr.get_task(id).unwrap().priority)
            .collect();
        assert_eq!(
            got,
            [
                Priority::P0,
                Priority::P1,
                Priority::P2,
                Priority::P3,
                Priority::P3,
                Priority::P3,
            ]
        );

        mgr.reorder_priorities(&ids[..2]).unwrap();
        assert_eq!(mgr.get_task(&ids[0]).unwrap().priority, Priority::P0);
        assert_eq!(mgr.get_task(&ids[1]).unwrap().priority, Priority::P1);
    }

    #[test]
    fn reorder_with_unknown_id_mutates_nothing() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);
        let id = mgr
            .create_task(TaskType::Feat, "x", None, CreateTaskOptions::default())
            .unwrap()
            .task
            .id;
        mgr.update_task_priority(&id, Priority::P3).unwrap();

        let err = mgr
            .reorder_priorities(&[id.clone(), "TASK-09999".to_string()])
            .unwrap_err();
        assert!(matches!(err, TaskdeckError::TaskNotFound(_)));
        assert_eq!(mgr.get_task(&id).unwrap().priority, Priority::P3);
    }

    #[test]
    fn cleanup_worktree_removes_and_clears() {
        let dir = TempDir::new().unwrap();
        let remover = leaked_remover(false);
        let mgr = TaskManager::new(
            dir.path(),
            Box::new(FakeCreator {
                base: dir.path().join("worktrees"),
                fail: false,
            }),
            Box::new(remover),
            Box::new(FakeContext),
        );
        let repo = dir.path().join("repo");
        let task = mgr
            .create_task(TaskType::Feat, "x", Some(&repo), CreateTaskOptions::default())
            .unwrap()
            .task;
        let wt = task.worktree.clone().unwrap();

        mgr.cleanup_worktree(&task.id).unwrap();
        assert_eq!(*remover.removed.lock().unwrap(), vec![wt]);
        assert!(mgr.get_task(&task.id).unwrap().worktree.is_none());
    }

    #[test]
    fn cleanup_of_absent_worktree_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        let remover = leaked_remover(true);
        let mgr = TaskManager::new(
            dir.path(),
            Box::new(FakeCreator {
                base: dir.path().join("worktrees"),
                fail: false,
            }),
            Box::new(remover),
            Box::new(FakeContext),
        );
        let repo = dir.path().join("repo");
        let task = mgr
            .create_task(TaskType::Feat, "x", Some(&repo), CreateTaskOptions::default())
            .unwrap()
            .task;

        // Worktree vanished out of band: the failing remover is never called.
        std::fs::remove_dir_all(task.worktree.as_ref().unwrap()).unwrap();
        mgr.cleanup_worktree(&task.id).unwrap();

        // No worktree recorded at all is also fine.
        let bare = mgr
            .create_task(TaskType::Feat, "x", None, CreateTaskOptions::default())
            .unwrap()
            .task;
        mgr.cleanup_worktree(&bare.id).unwrap();
    }

    #[test]
    fn cleanup_propagates_genuine_failures() {
        let dir = TempDir::new().unwrap();
        let mgr = TaskManager::new(
            dir.path(),
            Box::new(FakeCreator {
                base: dir.path().join("worktrees"),
                fail: false,
            }),
            Box::new(leaked_remover(true)),
            Box::new(FakeContext),
        );
        let repo = dir.path().join("repo");
        let task = mgr
            .create_task(TaskType::Feat, "x", Some(&repo), CreateTaskOptions::default())
            .unwrap()
            .task;

        let err = mgr.cleanup_worktree(&task.id).unwrap_err();
        assert!(matches!(err, TaskdeckError::Worktree { .. }));
        // Failed removal leaves the recorded path in place.
        assert!(mgr.get_task(&task.id).unwrap().worktree.is_some());
    }

    #[test]
    fn reads_on_empty_registry_return_empty() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);
        assert!(mgr.all_tasks().unwrap().is_empty());
        assert!(mgr.tasks_by_status(TaskStatus::Backlog).unwrap().is_empty());
    }

    #[test]
    fn corrupt_registry_surfaces_parse_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("backlog.yaml"), "{{{not yaml").unwrap();
        let mgr = manager(&dir);
        let err = mgr.all_tasks().unwrap_err();
        assert!(matches!(err, TaskdeckError::BacklogParse { .. }));
        assert!(err.to_string().contains("yaml"));
    }

    #[test]
    fn task_context_passthrough() {
        let dir = TempDir::new().unwrap();
        let mgr = manager(&dir);
        let id = mgr
            .create_task(TaskType::Feat, "x", None, CreateTaskOptions::default())
            .unwrap()
            .task
            .id;
        assert_eq!(mgr.task_context(&id).unwrap(), format!("context for {id}"));
        assert!(matches!(
            mgr.task_context("TASK-09999").unwrap_err(),
            TaskdeckError::TaskNotFound(_)
        ));
    }
}
