//! Object types and the algorithms that work on them
//!
//! - `branch`: branch names, HEAD state and revision expressions
//! - `checkout`: planning a move between two snapshots
//! - `core`: output plumbing (pager writer)
//! - `diff`: snapshot comparison and the positional line diff
//! - `index`: on-disk format of the staging index
//! - `log`: first-parent history traversal
//! - `merge`: common ancestor search and three-way reconciliation
//! - `objects`: blobs, commits and object IDs

pub mod branch;
pub mod checkout;
pub mod core;
pub mod diff;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
