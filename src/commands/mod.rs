//! Command implementations
//!
//! Every command is an `impl Repository` block, split the way git splits
//! them:
//!
//! - `plumbing`: low-level object access (hash-object, cat-file)
//! - `porcelain`: the version-control workflow (init, add, commit, ...)

pub mod plumbing;
pub mod porcelain;
