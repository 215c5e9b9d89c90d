use crate::adapters;
use crate::output::print_json;
use anyhow::Context;
use std::path::Path;

pub fn run(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let mgr = adapters::manager(root);
    let task = mgr
        .get_task(id)
        .with_context(|| format!("failed to load '{id}'"))?;

    if json {
        print_json(&task)?;
        return Ok(());
    }

    println!("Task: {}", task.id);
    println!("Title:    {}", task.title);
    println!("Type:     {}", task.task_type);
    println!("Status:   {}", task.status);
    println!("Priority: {}", task.priority);
    if let Some(prev) = task.previous_status {
        println!("Pre-archive status: {prev}");
    }
    if let Some(owner) = &task.owner {
        println!("Owner:    {owner}");
    }
    if let Some(repo) = &task.repo {
        println!("Repo:     {repo}");
    }
    if !task.branch.is_empty() {
        println!("Branch:   {}", task.branch);
    }
    println!("Ticket:   {}", task.ticket.display());
    if let Some(wt) = &task.worktree {
        println!("Worktree: {}", wt.display());
    }
    if !task.tags.is_empty() {
        println!("Tags:     {}", task.tags.join(", "));
    }
    if !task.blocked_by.is_empty() {
        println!("Blocked by: {}", task.blocked_by.join(", "));
    }
    if !task.related.is_empty() {
        println!("Related:  {}", task.related.join(", "));
    }
    println!("Created:  {}", task.created_at.format("%Y-%m-%d %H:%M"));
    println!("Updated:  {}", task.updated_at.format("%Y-%m-%d %H:%M"));
    Ok(())
}
