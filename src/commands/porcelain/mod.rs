//! Porcelain commands
//!
//! - `init`: create the repository metadata
//! - `add`: store file content and stage it
//! - `commit`: record the staged snapshot
//! - `log`: first-parent history of HEAD
//! - `branch`: list, create or reset branches
//! - `checkout`: switch branches or detach HEAD
//! - `merge`: three-way merge of another commit into HEAD
//! - `diff`: compare two commits

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod diff;
pub mod init;
pub mod log;
pub mod merge;
