//! Core building blocks shared by every command
//!
//! - **config**: optional build-meta.toml parsing and validation
//! - **error**: error types with contextual help messages and exit codes

pub mod config;
pub mod error;
