#![deny(unsafe_code)]

//! Shared test utilities for the AEOS workspace.
//!
//! Provides division fixtures, config builders, temporary config files, and
//! tracing helpers so that individual crate tests stay concise and
//! consistent.
//!
//! Add this crate as a `[dev-dependency]` in any workspace member:
//!
//! ```toml
//! [dev-dependencies]
//! aeos-test-utils = { workspace = true }
//! ```

pub mod config;
pub mod config_file;
pub mod divisions;
pub mod tracing_setup;
