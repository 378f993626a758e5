//! Inventory command implementation

use crate::core::config::BuildConfig;
use crate::core::error::BuildResult;
use crate::release::load_inventory;
use std::env;
use std::path::PathBuf;

/// Run the inventory command
pub fn run_inventory(collections_dir: PathBuf, config: Option<PathBuf>, json: bool) -> BuildResult<()> {
  let workspace_root = env::current_dir()?;
  let config = BuildConfig::resolve(config.as_deref(), &workspace_root)?;
  let inventory = load_inventory(&collections_dir, &config)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&inventory)?);
    return Ok(());
  }

  if inventory.is_empty() {
    println!("⚠️  No collections found in {}", collections_dir.display());
    return Ok(());
  }

  println!("📦 {} collection(s) in {}", inventory.len(), collections_dir.display());
  println!();
  for entry in inventory.iter() {
    if entry.directories.is_empty() {
      println!("  {}", entry.name);
    } else {
      println!("  {}  [{}]", entry.name, entry.directories.join(", "));
    }
    for exclude in &entry.excludes {
      println!("      exclude: {}", exclude);
    }
  }

  Ok(())
}
