//! Stored object types
//!
//! Everything in the object database is one of two kinds:
//!
//! - **Blob**: raw file content
//! - **Commit**: a full path -> blob snapshot plus parents, timestamp and message
//!
//! There are no tree objects; a commit carries its whole file mapping.
//! All objects share one framing: `<type> <size>\0<body>`, and an object's ID
//! is the SHA-1 of that framed form.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in raw bytes
pub const OBJECT_ID_RAW_LENGTH: usize = 20;

/// Length of an abbreviated object ID for display
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
