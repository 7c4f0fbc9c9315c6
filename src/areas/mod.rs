//! Repository areas
//!
//! - `database`: Object database storing blobs, trees and commits
//! - `index`: Staging area tracking the files of the next commit
//! - `refs`: Branch refs and HEAD
//! - `repository`: Locating a repository and tying the areas together
//! - `workspace`: Working tree file system access

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
