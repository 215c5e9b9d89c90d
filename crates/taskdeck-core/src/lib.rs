pub mod backlog;
pub mod bootstrap;
pub mod capabilities;
pub mod entry;
pub mod error;
pub mod idgen;
pub mod io;
pub mod manager;
pub mod paths;
pub mod templates;
pub mod types;

pub use error::{Result, TaskdeckError};
