//! A minimal content-addressed version-control engine.
//!
//! Snapshots of a working directory are stored as an immutable object graph
//! (blobs and commits keyed by their SHA-1), branches and HEAD point into that
//! graph, and divergent histories are reconciled with a three-way merge.
//!
//! The crate is laid out in three layers:
//!
//! - `areas`: on-disk state (object database, refs, staging index, workspace)
//!   tied together by the `Repository` handle
//! - `artifacts`: object types and the algorithms that operate on them
//! - `commands`: user-facing operations implemented on `Repository`
//!
//! A repository is meant to be driven by one process at a time. Concurrent
//! writers against the same `.minigit` directory are unsupported: individual
//! files are locked while they are written, but a sequence such as
//! "store commit, move branch, clear index" is not atomic across processes.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod config;
pub mod errors;

pub use areas::repository::Repository;
pub use artifacts::merge::MergeOutcome;
pub use errors::RepositoryError;

/// Name of the metadata directory at the root of every repository
pub const REPOSITORY_DIR: &str = ".minigit";
