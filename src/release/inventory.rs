//! Collection inventory from an `ansible_collections/` tree

use crate::core::config::BuildConfig;
use crate::core::error::{BuildResult, ConfigurationError, ResultExt};
use crate::manifest::model::CollectionInventory;
use std::fs;
use std::path::Path;

/// Subdirectories that are never declared as data directories
const SKIPPED_DIRECTORIES: &[&str] = &["tests", "docs"];

/// Scan `<collections_dir>/<namespace>/<name>/` into an inventory
///
/// Collections are ordered by name. A collection's declared directories are
/// its immediate subdirectories, minus hidden ones and test/doc trees.
pub fn scan_collections(collections_dir: &Path) -> BuildResult<CollectionInventory> {
  if !collections_dir.is_dir() {
    return Err(
      ConfigurationError::NotFound {
        path: collections_dir.to_path_buf(),
      }
      .into(),
    );
  }

  let mut inventory = CollectionInventory::new();
  for namespace in sorted_subdirectories(collections_dir)? {
    let namespace_dir = collections_dir.join(&namespace);
    for name in sorted_subdirectories(&namespace_dir)? {
      let collection_dir = namespace_dir.join(&name);
      let directories = sorted_subdirectories(&collection_dir)?
        .into_iter()
        .filter(|d| !SKIPPED_DIRECTORIES.contains(&d.as_str()))
        .collect();
      inventory.insert(format!("{}.{}", namespace, name), directories)?;
    }
  }

  Ok(inventory)
}

/// Scan the tree and attach the configured exclude paths
pub fn load_inventory(collections_dir: &Path, config: &BuildConfig) -> BuildResult<CollectionInventory> {
  let mut inventory = scan_collections(collections_dir)?;
  for (name, excludes) in &config.excludes {
    inventory
      .set_excludes(name, excludes.clone())
      .with_context(|| format!("Invalid [excludes] entry in {}", config.source_name()))?;
  }
  Ok(inventory)
}

/// Names of non-hidden subdirectories, sorted
fn sorted_subdirectories(dir: &Path) -> BuildResult<Vec<String>> {
  let mut names = Vec::new();
  let entries = fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;
  for entry in entries {
    let entry = entry?;
    if !entry.file_type()?.is_dir() {
      continue;
    }
    let name = entry.file_name().to_string_lossy().into_owned();
    if name.starts_with('.') || name == "__pycache__" {
      continue;
    }
    names.push(name);
  }
  names.sort();
  Ok(names)
}
