use crate::adapters;
use crate::output::{print_json, print_task_table};
use anyhow::Context;
use std::path::Path;
use taskdeck_core::backlog::TaskFilter;
use taskdeck_core::types::{Priority, TaskStatus};

pub fn run(
    root: &Path,
    status: Option<&str>,
    priority: Option<&str>,
    owner: Option<&str>,
    repo: Option<&str>,
    tags: Vec<String>,
    json: bool,
) -> anyhow::Result<()> {
    let filter = TaskFilter {
        status: status.map(|s| s.parse::<TaskStatus>()).transpose()?,
        priority: priority.map(|p| p.parse::<Priority>()).transpose()?,
        owner: owner.map(str::to_string),
        repo: repo.map(str::to_string),
        tags,
    };

    let mgr = adapters::manager(root);
    let tasks = mgr.filter_tasks(&filter).context("failed to list tasks")?;

    if json {
        print_json(&tasks)?;
        return Ok(());
    }

    if tasks.is_empty() {
        println!("No tasks.");
        return Ok(());
    }

    print_task_table(&tasks);
    Ok(())
}
