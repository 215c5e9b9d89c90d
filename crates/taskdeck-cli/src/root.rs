use std::path::{Path, PathBuf};
use taskdeck_core::paths::BACKLOG_FILE;

/// Resolve the taskdeck root directory.
///
/// Priority:
/// 1. `--root` flag / `TASKDECK_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `backlog.yaml`
/// 3. Walk upward from `cwd` looking for `.git/`
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_root_from(explicit, &cwd)
}

fn resolve_root_from(explicit: Option<&Path>, cwd: &Path) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    if let Some(dir) = find_up(cwd, |d| d.join(BACKLOG_FILE).is_file()) {
        return dir;
    }
    if let Some(dir) = find_up(cwd, |d| d.join(".git").is_dir()) {
        return dir;
    }
    cwd.to_path_buf()
}

fn find_up(start: &Path, hit: impl Fn(&Path) -> bool) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        if hit(dir) {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}
