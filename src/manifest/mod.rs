//! Manifest generator
//!
//! Turns release metadata and a collection inventory into the `setup.py` of
//! the Ansible community meta-package:
//!
//! - **version**: PEP 440 style release versions
//! - **model**: inputs (`ReleaseMetadata`, `CollectionInventory`) and output (`PackagingDescription`)
//! - **strategy**: major-version buckets (package layout + supported Pythons)
//! - **generate**: the pure `generate()` entry point
//! - **render**: `setup.py` text rendering
//! - **source**: `MANIFEST.in` text rendering
//!
//! Nothing in here touches the filesystem or prints; see `release` for the
//! collaborators that read inputs from disk.

pub mod generate;
pub mod model;
pub mod render;
pub mod source;
pub mod strategy;
pub mod version;

pub use generate::generate;
pub use model::{CollectionInventory, PackagingDescription, ReleaseMetadata};
pub use render::MANIFEST_FILE;
pub use source::{MANIFEST_IN_FILE, SourceManifest};
pub use version::ReleaseVersion;
