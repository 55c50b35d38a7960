//! Checkout planning
//!
//! Moving the working directory from one snapshot to another is planned as a
//! `Migration` first and applied to the workspace afterwards.

pub mod migration;
