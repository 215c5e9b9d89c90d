use crate::adapters;
use crate::output::print_json;
use anyhow::Context;
use std::path::Path;

pub fn run(root: &Path, id: &str, json: bool) -> anyhow::Result<()> {
    let mgr = adapters::manager(root);
    mgr.cleanup_worktree(id)
        .with_context(|| format!("failed to clean up worktree for '{id}'"))?;

    if json {
        print_json(&serde_json::json!({ "id": id, "worktree": serde_json::Value::Null }))?;
    } else {
        println!("Cleaned up worktree for {id}");
    }
    Ok(())
}
