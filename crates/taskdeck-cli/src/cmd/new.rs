use crate::adapters;
use crate::output::print_json;
use anyhow::Context;
use std::path::{Path, PathBuf};
use taskdeck_core::bootstrap::IdSpec;
use taskdeck_core::manager::CreateTaskOptions;
use taskdeck_core::types::{Priority, TaskType};

pub struct NewArgs {
    pub task_type: String,
    pub title: String,
    pub branch: String,
    pub repo: Option<PathBuf>,
    pub base: Option<String>,
    pub id: Option<String>,
    pub priority: Option<String>,
    pub owner: Option<String>,
    pub tags: Vec<String>,
    pub source: Option<String>,
}

pub fn run(root: &Path, args: NewArgs, json: bool) -> anyhow::Result<()> {
    let task_type: TaskType = args.task_type.parse()?;
    let priority = args
        .priority
        .as_deref()
        .map(|p| p.parse::<Priority>())
        .transpose()?;

    let opts = CreateTaskOptions {
        title: if args.title.is_empty() {
            None
        } else {
            Some(args.title)
        },
        id: args.id.map(IdSpec::Explicit),
        base_branch: args.base,
        priority,
        owner: args.owner,
        tags: args.tags,
        source: args.source,
        ..Default::default()
    };

    let mgr = adapters::manager(root);
    let out = mgr
        .create_task(task_type, &args.branch, args.repo.as_deref(), opts)
        .context("failed to create task")?;

    if let Some(err) = &out.worktree_error {
        eprintln!("warning: ticket created but worktree setup failed: {err:#}");
    }

    if json {
        print_json(&serde_json::json!({
            "id": out.task.id,
            "status": out.task.status.to_string(),
            "ticket": out.task.ticket,
            "worktree": out.task.worktree,
            "worktree_error": out.worktree_error.as_ref().map(|e| format!("{e:#}")),
        }))?;
    } else {
        println!("Created task {} ({})", out.task.id, out.task.task_type);
        println!("Ticket:   {}", out.task.ticket.display());
        if let Some(wt) = &out.task.worktree {
            println!("Worktree: {}", wt.display());
        }
    }
    Ok(())
}
