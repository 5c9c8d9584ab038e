//! Test helpers shared across crates in the flagenv workspace.
//!
//! [`env`] serialises mutation of the process environment; [`table`] builds
//! in-memory environment tables for tests that never touch the process.

pub mod env;
pub mod table;
