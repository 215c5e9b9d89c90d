use crate::adapters;
use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use taskdeck_core::types::Priority;

pub fn set(root: &Path, id: &str, priority: &str, json: bool) -> anyhow::Result<()> {
    let priority: Priority = priority.parse()?;
    let mgr = adapters::manager(root);
    let task = mgr
        .update_task_priority(id, priority)
        .with_context(|| format!("failed to set priority of '{id}'"))?;

    if json {
        print_json(&serde_json::json!({ "id": task.id, "priority": task.priority.to_string() }))?;
    } else {
        println!("{} -> {}", task.id, task.priority);
    }
    Ok(())
}

/// Reassign priorities by position: first four IDs get P0..P3, the rest P3.
pub fn reorder(root: &Path, ids: Vec<String>, json: bool) -> anyhow::Result<()> {
    let mgr = adapters::manager(root);
    mgr.reorder_priorities(&ids)
        .context("failed to reorder priorities")?;

    if json {
        let assigned: Vec<serde_json::Value> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                serde_json::json!({
                    "id": id,
                    "priority": Priority::for_position(i).to_string(),
                })
            })
            .collect();
        print_json(&assigned)?;
    } else {
        for (i, id) in ids.iter().enumerate() {
            println!("{}  {}", Priority::for_position(i), id);
        }
    }
    Ok(())
}
