use crate::adapters;
use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use taskdeck_core::types::TaskStatus;

pub fn run(root: &Path, id: &str, status: &str, json: bool) -> anyhow::Result<()> {
    let status: TaskStatus = status.parse()?;
    let mgr = adapters::manager(root);
    let task = mgr
        .update_task_status(id, status)
        .with_context(|| format!("failed to update status of '{id}'"))?;

    if json {
        print_json(&serde_json::json!({ "id": task.id, "status": task.status.to_string() }))?;
    } else {
        println!("{} -> {}", task.id, task.status);
    }
    Ok(())
}
