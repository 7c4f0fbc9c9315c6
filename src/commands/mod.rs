//! Command implementations
//!
//! Each command is an `impl Repository` block that prints to the repository's
//! writer. They are organized into two categories:
//!
//! - `plumbing`: Low-level commands for direct object and index manipulation
//! - `porcelain`: User-facing commands (init, add, commit, log)

pub mod plumbing;
pub mod porcelain;
