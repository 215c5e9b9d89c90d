mod adapters;
mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::new::NewArgs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "taskdeck",
    about = "Task lifecycle manager — bootstrap, resume, reprioritize, and archive tasks across repositories",
    version,
    propagate_version = true
)]
struct Cli {
    /// Taskdeck root (default: auto-detect from backlog.yaml or .git/)
    #[arg(long, global = true, env = "TASKDECK_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a backlog and tickets directory
    Init,

    /// Bootstrap a new task: ID, ticket folder, and optional worktree
    New {
        /// Task type: feat, bug, spike, or refactor
        task_type: String,

        /// Task title
        title: Vec<String>,

        /// Branch name for the worktree (stored verbatim, never validated)
        #[arg(long, default_value = "")]
        branch: String,

        /// Repository to create a worktree in
        #[arg(long)]
        repo: Option<PathBuf>,

        /// Base branch for the worktree
        #[arg(long)]
        base: Option<String>,

        /// Explicit (hierarchical) task ID instead of a sequential one
        #[arg(long)]
        id: Option<String>,

        /// Priority: P0..P3
        #[arg(long)]
        priority: Option<String>,

        /// Owner
        #[arg(long)]
        owner: Option<String>,

        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Source reference (issue URL, message link, ...)
        #[arg(long)]
        source: Option<String>,
    },

    /// Mark a task in progress
    Resume { id: String },

    /// Set a task's status (archived is only reachable via `archive`)
    Status { id: String, status: String },

    /// Archive a task: move its ticket under tickets/_archived/
    Archive { id: String },

    /// Restore an archived task to its pre-archive status
    Unarchive { id: String },

    /// Set a task's priority
    Priority { id: String, priority: String },

    /// Reassign priorities by position: first four IDs get P0..P3, rest P3
    Reorder {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// List tasks, optionally filtered
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        owner: Option<String>,
        #[arg(long)]
        repo: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Show full details for one task
    Show { id: String },

    /// Print a task's context document
    Context { id: String },

    /// Remove a task's worktree
    Cleanup { id: String },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root, cli.json),
        Commands::New {
            task_type,
            title,
            branch,
            repo,
            base,
            id,
            priority,
            owner,
            tags,
            source,
        } => cmd::new::run(
            &root,
            NewArgs {
                task_type,
                title: title.join(" "),
                branch,
                repo,
                base,
                id,
                priority,
                owner,
                tags,
                source,
            },
            cli.json,
        ),
        Commands::Resume { id } => cmd::resume::run(&root, &id, cli.json),
        Commands::Status { id, status } => cmd::status::run(&root, &id, &status, cli.json),
        Commands::Archive { id } => cmd::archive::archive(&root, &id, cli.json),
        Commands::Unarchive { id } => cmd::archive::unarchive(&root, &id, cli.json),
        Commands::Priority { id, priority } => cmd::priority::set(&root, &id, &priority, cli.json),
        Commands::Reorder { ids } => cmd::priority::reorder(&root, ids, cli.json),
        Commands::List {
            status,
            priority,
            owner,
            repo,
            tags,
        } => cmd::list::run(
            &root,
            status.as_deref(),
            priority.as_deref(),
            owner.as_deref(),
            repo.as_deref(),
            tags,
            cli.json,
        ),
        Commands::Show { id } => cmd::show::run(&root, &id, cli.json),
        Commands::Context { id } => cmd::context::run(&root, &id, cli.json),
        Commands::Cleanup { id } => cmd::cleanup::run(&root, &id, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
