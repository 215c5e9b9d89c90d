use crate::adapters;
use crate::output::print_json;
use anyhow::Context;
use std::path::Path;

pub fn run(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let mgr = adapters::manager(root);
    let context = mgr
        .task_context(id)
        .with_context(|| format!("failed to load context for '{id}'"))?;

    if json {
        print_json(&serde_json::json!({ "id": id, "context": context }))?;
    } else {
        print!("{context}");
    }
    Ok(())
}
