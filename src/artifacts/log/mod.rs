//! Commit history traversal
//!
//! - `rev_list`: lazy first-parent walk from any commit
//!
//! The walk follows ordinary parents only, so the commits merged in by a
//! merge commit never appear in it. It terminates because a commit can only
//! name parents that existed before it.

pub mod rev_list;
