use crate::adapters;
use crate::output::print_json;
use anyhow::Context;
use std::path::Path;

pub fn run(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let mgr = adapters::manager(root);
    let task = mgr
        .resume_task(id)
        .with_context(|| format!("failed to resume '{id}'"))?;

    if json {
        print_json(&task)?;
    } else {
        println!("Resumed {} ({})", task.id, task.status);
        println!("Ticket: {}", task.ticket.display());
        if let Some(wt) = &task.worktree {
            println!("Worktree: {}", wt.display());
        }
    }
    Ok(())
}
