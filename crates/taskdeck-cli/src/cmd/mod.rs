pub mod archive;
pub mod cleanup;
pub mod context;
pub mod init;
pub mod list;
pub mod new;
pub mod priority;
pub mod resume;
pub mod show;
pub mod status;
