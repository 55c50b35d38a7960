//! Stateful repository areas
//!
//! Each area owns one part of the on-disk state:
//!
//! - `database`: content-addressed object store for blobs and commits
//! - `index`: staging area for the next commit
//! - `refs`: branches, HEAD and MERGE_HEAD
//! - `repository`: the handle tying the areas together
//! - `workspace`: working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
