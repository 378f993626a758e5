//! CLI commands for ansible-build-meta
//!
//! Thin wrappers that read inputs from disk, call the pure manifest generator
//! and write or compare its output:
//!
//! - **generate**: render one release's `setup.py`
//! - **verify**: check that a published manifest reproduces byte for byte
//! - **batch**: render several releases in parallel
//! - **inventory**: show the collection inventory scanned from a tree

pub mod batch;
pub mod generate;
pub mod inventory;
pub mod verify;

pub use batch::run_batch;
pub use generate::run_generate;
pub use inventory::run_inventory;
pub use verify::run_verify;
