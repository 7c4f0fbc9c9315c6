//! Plumbing commands (low-level operations)
//!
//! Plumbing commands give direct access to the object database and the index.
//! They're primarily used for scripting and as building blocks for porcelain
//! commands.
//!
//! ## Commands
//!
//! - `hash-object`: Compute a blob ID and optionally store it
//! - `cat-file`: Print an object's type or content
//! - `ls-tree`: List the contents of a tree object
//! - `write-tree`: Store the trees describing the index
//! - `update-index`: Stage or unstage a single file
//! - `ls-files`: List staged paths

pub mod cat_file;
pub mod hash_object;
pub mod ls_files;
pub mod ls_tree;
pub mod update_index;
pub mod write_tree;
