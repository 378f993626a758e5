//! Release inputs for the manifest generator
//!
//! The generator itself is pure. This module holds the collaborators that
//! turn files from a release checkout into its inputs:
//!
//! - **deps**: `ansible-X.Y.Z.deps` files -> `ReleaseMetadata`
//! - **inventory**: an `ansible_collections/` tree -> `CollectionInventory`
//!
//! # Example layout
//!
//! ```text
//! build-data/8/ansible-8.0.0.deps
//! ansible-8.0.0/ansible_collections/community/general/plugins/...
//! ansible-8.0.0/setup.py          <- generated
//! ```

pub mod deps;
pub mod inventory;

pub use deps::DependencyData;
pub use inventory::load_inventory;
