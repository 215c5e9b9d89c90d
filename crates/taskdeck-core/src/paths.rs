use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory and file constants
// ---------------------------------------------------------------------------

pub const TICKETS_DIR: &str = "tickets";
pub const ARCHIVED_DIR: &str = "tickets/_archived";

pub const BACKLOG_FILE: &str = "backlog.yaml";
pub const COUNTER_FILE: &str = ".task-id-counter";

pub const STATUS_FILE: &str = "status.yaml";
pub const CONTEXT_FILE: &str = "context.md";
pub const NOTES_FILE: &str = "notes.md";
pub const DESIGN_FILE: &str = "design.md";
pub const COMMUNICATIONS_DIR: &str = "communications";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn backlog_path(root: &Path) -> PathBuf {
    root.join(BACKLOG_FILE)
}

pub fn counter_path(root: &Path) -> PathBuf {
    root.join(COUNTER_FILE)
}

/// Active location for a ticket. Pure join, no existence check.
pub fn active_ticket_dir(root: &Path, id: &str) -> PathBuf {
    root.join(TICKETS_DIR).join(id)
}

/// Archived location for a ticket. Pure join, no existence check.
pub fn archived_ticket_dir(root: &Path, id: &str) -> PathBuf {
    root.join(ARCHIVED_DIR).join(id)
}

/// Resolve where a ticket's files live, whatever its lifecycle state.
///
/// Prefers the active location if it exists on disk, then the archived
/// location, and defaults to the active location for tickets that have not
/// been materialized yet. Downstream readers use this instead of branching
/// on task status themselves.
pub fn resolve_ticket_dir(root: &Path, id: &str) -> PathBuf {
    let active = active_ticket_dir(root, id);
    if active.is_dir() {
        return active;
    }
    let archived = archived_ticket_dir(root, id);
    if archived.is_dir() {
        return archived;
    }
    active
}

pub fn ticket_status_path(ticket_dir: &Path) -> PathBuf {
    ticket_dir.join(STATUS_FILE)
}

pub fn ticket_context_path(ticket_dir: &Path) -> PathBuf {
    ticket_dir.join(CONTEXT_FILE)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
