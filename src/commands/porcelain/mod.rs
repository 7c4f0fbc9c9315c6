//! Porcelain commands (user-facing operations)
//!
//! Porcelain commands compose the plumbing and the repository areas into the
//! everyday workflow.
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage files and directories for commit
//! - `commit`: Record the staged snapshot on the current branch
//! - `log`: Show the history of the current branch

pub mod add;
pub mod commit;
pub mod init;
pub mod log;
