use crate::types::{Priority, TaskStatus, TaskType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// TaskEntry
// ---------------------------------------------------------------------------

/// One task's registry record as persisted in `backlog.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskEntry {
    pub id: String,
    pub title: String,
    pub task_type: TaskType,
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    /// Branch name, stored verbatim. May be empty or contain arbitrary
    /// characters; this core never validates it.
    #[serde(default)]
    pub branch: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worktree: Option<PathBuf>,
    pub ticket: PathBuf,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocked_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Status held immediately before archiving. Present only while the
    /// entry is archived; unarchive restores it exactly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_status: Option<TaskStatus>,
}

impl TaskEntry {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        task_type: TaskType,
        ticket: impl Into<PathBuf>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            task_type,
            status: TaskStatus::Backlog,
            priority: Priority::default(),
            owner: None,
            repo: None,
            branch: String::new(),
            worktree: None,
            ticket: ticket.into(),
            created_at: now,
            updated_at: now,
            tags: Vec::new(),
            blocked_by: Vec::new(),
            related: Vec::new(),
            source: None,
            previous_status: None,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// ---------------------------------------------------------------------------
// TaskPatch
// ---------------------------------------------------------------------------

/// Partial update: only populated fields are merged over an existing entry.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub branch: Option<String>,
    pub worktree: Option<Option<PathBuf>>,
    pub ticket: Option<PathBuf>,
    pub tags: Option<Vec<String>>,
    pub blocked_by: Option<Vec<String>>,
    pub related: Option<Vec<String>>,
    pub source: Option<String>,
    pub previous_status: Option<Option<TaskStatus>>,
}

impl TaskPatch {
    pub fn apply(self, entry: &mut TaskEntry) {
        if let Some(title) = self.title {
            entry.title = title;
        }
        if let Some(status) = self.status {
            entry.status = status;
        }
        if let Some(priority) = self.priority {
            entry.priority = priority;
        }
        if let Some(owner) = self.owner {
            entry.owner = Some(owner);
        }
        if let Some(repo) = self.repo {
            entry.repo = Some(repo);
        }
        if let Some(branch) = self.branch {
            entry.branch = branch;
        }
        if let Some(worktree) = self.worktree {
            entry.worktree = worktree;
        }
        if let Some(ticket) = self.ticket {
            entry.ticket = ticket;
        }
        if let Some(tags) = self.tags {
            entry.tags = tags;
        }
        if let Some(blocked_by) = self.blocked_by {
            entry.blocked_by = blocked_by;
        }
        if let Some(related) = self.related {
            entry.related = related;
        }
        if let Some(source) = self.source {
            entry.source = Some(source);
        }
        if let Some(previous_status) = self.previous_status {
            entry.previous_status = previous_status;
        }
        entry.touch();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
