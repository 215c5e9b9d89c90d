use crate::types::TaskType;

/// Starter body for a ticket's `context.md`.
pub fn context_md(task_type: TaskType, id: &str, title: &str) -> String {
    format!(
        "# {id}: {title}\n\n\
         Type: {task_type}\n\n\
         ## Context\n\n\
         _Why this task exists and what done looks like._\n"
    )
}

/// Starter body for a ticket's `notes.md`.
pub fn notes_md(id: &str) -> String {
    format!("# Notes — {id}\n\n")
}

/// Starter body for a ticket's `design.md`, varying by task type.
pub fn design_md(task_type: TaskType, id: &str) -> String {
    let section = match task_type {
        TaskType::Feat => "## Approach\n\n## Rollout\n",
        TaskType::Bug => "## Reproduction\n\n## Root cause\n\n## Fix\n",
        TaskType::Spike => "## Questions\n\n## Findings\n",
        TaskType::Refactor => "## Current shape\n\n## Target shape\n",
    };
    format!("# Design — {id}\n\n{section}")
}

/// Seed document for a ticket's `status.yaml`.
pub fn status_yaml(id: &str, task_type: TaskType) -> String {
    format!("id: {id}\ntask_type: {task_type}\nstatus: backlog\n")
}
