//! Staging index file format
//!
//! The index holds the paths staged for the next commit together with the
//! blob each one points at. It carries no stat metadata: every `add` hashes
//! the file content.
//!
//! ## File Format (Version 1)
//!
//! ```text
//! Header (12 bytes):
//!   - Signature: "MIDX" (4 bytes)
//!   - Version: 1 (4 bytes, big-endian)
//!   - Entry count (4 bytes, big-endian)
//!
//! Entries (variable length, in staging order):
//!   - Blob ID (20 raw bytes)
//!   - Path length (2 bytes, big-endian)
//!   - Path (UTF-8, no terminator)
//!
//! Checksum (20 bytes):
//!   - SHA-1 hash of all preceding bytes
//! ```

pub mod checksum;
pub mod index_entry;
pub mod index_header;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of index header in bytes
pub const HEADER_SIZE: usize = 12; // 4 bytes for marker, 4 for version, 4 for entries_count

/// Magic signature identifying index files
pub const SIGNATURE: &str = "MIDX";

/// Index file format version
pub const VERSION: u32 = 1;
