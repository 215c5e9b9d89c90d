use crate::adapters;
use crate::output::print_json;
use anyhow::Context;
use std::path::Path;

pub fn archive(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let mgr = adapters::manager(root);
    let task = mgr
        .archive_task(id)
        .with_context(|| format!("failed to archive '{id}'"))?;

    if json {
        print_json(&serde_json::json!({
            "id": task.id,
            "status": task.status.to_string(),
            "previous_status": task.previous_status.map(|s| s.to_string()),
            "ticket": task.ticket,
        }))?;
    } else {
        println!("Archived {}", task.id);
        println!("Ticket moved to {}", task.ticket.display());
    }
    Ok(())
}

pub fn unarchive(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let mgr = adapters::manager(root);
    let task = mgr
        .unarchive_task(id)
        .with_context(|| format!("failed to unarchive '{id}'"))?;

    if json {
        print_json(&serde_json::json!({
            "id": task.id,
            "status": task.status.to_string(),
            "ticket": task.ticket,
        }))?;
    } else {
        println!("Unarchived {} (status: {})", task.id, task.status);
    }
    Ok(())
}
