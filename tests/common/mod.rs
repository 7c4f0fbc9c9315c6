#![allow(dead_code)]

pub mod command;
pub mod file;

/// Hashes of the `one`, `two` and `three` blobs staged by the nested fixture
pub const ONE_BLOB: &str = "43dd47ea691c90a5fa7827892c70241913351963";
pub const TWO_BLOB: &str = "64c5e5885a4b06010b3a0c20edb7900dd0311025";
pub const THREE_BLOB: &str = "1d19714ffbc272ba0da6eb419d66123c20527174";

/// Trees of the nested fixture: `1.txt`, `a/2.txt`, `a/b/3.txt`
pub const ROOT_TREE: &str = "88484bd9e7919fa9b7dfeb008fb8f6c85743d171";
pub const A_TREE: &str = "202bc192d34beb85d0301ec8c8940cd0252cc48a";
pub const AB_TREE: &str = "d864f7793fd2952c217c27d3780442f8943c8663";

/// The fixture's first commit, authored by the fixed test identity
pub const INITIAL_COMMIT: &str = "03e425922bd673c1d3e73f7813110752682b0505";

/// Path of the loose object file for `oid` below the work-tree root
pub fn object_path(oid: &str) -> std::path::PathBuf {
    std::path::Path::new(".twig")
        .join("objects")
        .join(&oid[..2])
        .join(&oid[2..])
}
