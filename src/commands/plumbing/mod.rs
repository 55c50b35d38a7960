//! Plumbing commands
//!
//! Direct access to the object database, used for scripting and debugging:
//!
//! - `hash-object`: compute a blob ID and optionally store the blob
//! - `cat-file`: print a stored object or its type
//!
//! `write_commit` is the shared step every porcelain command that records
//! history goes through.

pub mod cat_file;
pub mod hash_object;
mod write_commit;
