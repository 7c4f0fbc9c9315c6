//! twig: a small content-addressed version-control store
//!
//! The crate is split the same way the on-disk repository is:
//!
//! - `areas`: the stateful parts of a repository (object database, index,
//!   refs, working tree)
//! - `artifacts`: pure data types and their binary/text codecs
//! - `commands`: plumbing and porcelain commands run against a repository
//! - `errors`: the typed error returned by areas and artifacts

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
