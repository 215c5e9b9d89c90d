use crate::entry::{TaskEntry, TaskPatch};
use crate::error::{Result, TaskdeckError};
use crate::types::{Priority, TaskStatus};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// TaskFilter
// ---------------------------------------------------------------------------

/// Conjunction of optional criteria. Absent fields match everything.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub tags: Vec<String>,
}

impl TaskFilter {
    fn matches(&self, entry: &TaskEntry) -> bool {
        if let Some(status) = self.status {
            if entry.status != status {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if entry.priority != priority {
                return false;
            }
        }
        if let Some(owner) = &self.owner {
            if entry.owner.as_deref() != Some(owner.as_str()) {
                return false;
            }
        }
        if let Some(repo) = &self.repo {
            if entry.repo.as_deref() != Some(repo.as_str()) {
                return false;
            }
        }
        self.tags.iter().all(|t| entry.tags.contains(t))
    }
}

// ---------------------------------------------------------------------------
// BacklogStore
// ---------------------------------------------------------------------------

/// YAML-backed task registry: one `backlog.yaml` document mapping task ID to
/// its entry. System of record for status, priority, and metadata.
///
/// Cross-process concurrency is out of scope: `save` is a full-document
/// atomic rewrite, so edits made to the file by another process between a
/// `load` and the next `save` are overwritten (last writer wins).
#[derive(Debug)]
pub struct BacklogStore {
    path: PathBuf,
    tasks: BTreeMap<String, TaskEntry>,
}

impl BacklogStore {
    /// Load the registry from `path`. An absent file yields an empty store;
    /// malformed YAML fails without constructing a partially populated one.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                tasks: BTreeMap::new(),
            });
        }
        let data = std::fs::read_to_string(&path)?;
        let tasks: BTreeMap<String, TaskEntry> =
            serde_yaml::from_str(&data).map_err(|source| TaskdeckError::BacklogParse {
                path: path.clone(),
                source,
            })?;
        Ok(Self { path, tasks })
    }

    /// Full-document rewrite via tempfile + rename.
    pub fn save(&self) -> Result<()> {
        let data = serde_yaml::to_string(&self.tasks)?;
        crate::io::atomic_write(&self.path, data.as_bytes())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // ---------------------------------------------------------------------------
    // Mutations (in-memory; callers persist with `save`)
    // ---------------------------------------------------------------------------

    pub fn add(&mut self, entry: TaskEntry) -> Result<()> {
        if entry.id.is_empty() {
            return Err(TaskdeckError::EmptyTaskId);
        }
        if self.tasks.contains_key(&entry.id) {
            return Err(TaskdeckError::TaskExists(entry.id));
        }
        self.tasks.insert(entry.id.clone(), entry);
        Ok(())
    }

    pub fn update(&mut self, id: &str, patch: TaskPatch) -> Result<&TaskEntry> {
        let entry = self
            .tasks
            .get_mut(id)
            .ok_or_else(|| TaskdeckError::TaskNotFound(id.to_string()))?;
        patch.apply(entry);
        Ok(entry)
    }

    // ---------------------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------------------

    pub fn get(&self, id: &str) -> Result<&TaskEntry> {
        self.tasks
            .get(id)
            .ok_or_else(|| TaskdeckError::TaskNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tasks.contains_key(id)
    }

    pub fn all(&self) -> Vec<&TaskEntry> {
        self.tasks.values().collect()
    }

    pub fn filter(&self, filter: &TaskFilter) -> Vec<&TaskEntry> {
        self.tasks.values().filter(|e| filter.matches(e)).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
