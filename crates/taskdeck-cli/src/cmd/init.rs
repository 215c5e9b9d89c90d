use crate::output::print_json;
use anyhow::Context;
use std::path::Path;
use taskdeck_core::{io, paths};

/// Seed an empty backlog and the tickets directory tree.
pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    io::ensure_dir(&root.join(paths::TICKETS_DIR)).context("failed to create tickets dir")?;
    io::ensure_dir(&root.join(paths::ARCHIVED_DIR)).context("failed to create archive dir")?;
    let created = io::write_if_missing(&paths::backlog_path(root), b"{}\n")
        .context("failed to write backlog.yaml")?;

    if json {
        print_json(&serde_json::json!({ "root": root, "created": created }))?;
    } else if created {
        println!("Initialized taskdeck in {}", root.display());
    } else {
        println!("taskdeck already initialized in {}", root.display());
    }
    Ok(())
}
