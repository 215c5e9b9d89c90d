use crate::error::Result;
use crate::io;
use std::path::PathBuf;

/// Sequential task ID allocator backed by a persisted counter file.
///
/// Each call to [`next`](TaskIdGenerator::next) reads the counter, increments
/// it, persists the new value with an atomic replace, and only then returns
/// the formatted ID. A crash mid-write leaves either the old or the new
/// counter on disk, so an ID is never silently reused.
///
/// Caller-supplied hierarchical IDs (e.g. `github.com/org/repo/feature`) are
/// an orthogonal namespace: the generator never sees them and never collides
/// with them.
#[derive(Debug, Clone)]
pub struct TaskIdGenerator {
    counter_path: PathBuf,
}

impl TaskIdGenerator {
    pub fn new(counter_path: impl Into<PathBuf>) -> Self {
        Self {
            counter_path: counter_path.into(),
        }
    }

    /// Allocate the next sequential ID as `<prefix>-NNNNN`.
    pub fn next(&self, prefix: &str) -> Result<String> {
        let current = self.read_counter()?;
        let next = current + 1;
        // Persist before handing out the ID so a crash can skip a number
        // but never reissue one.
        io::atomic_write(&self.counter_path, next.to_string().as_bytes())?;
        Ok(format!("{prefix}-{next:05}"))
    }

    /// Peek at the current counter without allocating.
    pub fn current(&self) -> Result<u64> {
        self.read_counter()
    }

    fn read_counter(&self) -> Result<u64> {
        if !self.counter_path.exists() {
            return Ok(0);
        }
        let raw = std::fs::read_to_string(&self.counter_path)?;
        let value = raw.trim().parse::<u64>().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "corrupt id counter at {}: {e}",
                    self.counter_path.display()
                ),
            )
        })?;
        Ok(value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
