//! Snapshot and content comparison
//!
//! - `file_diff`: which paths differ between two file mappings
//! - `line_diff`: positional line comparison of two versions of a file
//!
//! The line comparison is deliberately unaligned: line `i` of one side is
//! only ever compared with line `i` of the other. An insertion in the middle
//! of a file therefore reports every following line as changed.

pub mod file_diff;
pub mod line_diff;
