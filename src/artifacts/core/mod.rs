//! Shared helpers for artifacts that depend on the user's environment

pub mod identity;
