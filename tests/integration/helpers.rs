//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A release build directory with a collections tree and a deps file
pub struct TestRelease {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestRelease {
  /// Create an empty release directory with `ansible_collections/`
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    std::fs::create_dir_all(path.join("ansible_collections"))?;
    Ok(Self { _root: root, path })
  }

  /// Add a collection with the given top-level directories
  pub fn add_collection(&self, name: &str, dirs: &[&str]) -> Result<PathBuf> {
    let (namespace, collection) = name.split_once('.').context("collection name must be namespace.name")?;
    let collection_path = self.collections_dir().join(namespace).join(collection);
    std::fs::create_dir_all(&collection_path)?;
    std::fs::write(
      collection_path.join("galaxy.yml"),
      format!("namespace: {}\nname: {}\n", namespace, collection),
    )?;
    for dir in dirs {
      std::fs::create_dir_all(collection_path.join(dir))?;
    }
    Ok(collection_path)
  }

  /// Write `ansible-<version>.deps` and return its path
  pub fn write_deps(&self, version: &str, core_version: &str, collections: &[(&str, &str)]) -> Result<PathBuf> {
    let mut content = format!(
      "_ansible_version: {}\n_ansible_core_version: {}\n_python: >=3.9\n",
      version, core_version
    );
    for (name, collection_version) in collections {
      content.push_str(&format!("{}: {}\n", name, collection_version));
    }
    let path = self.path.join(format!("ansible-{}.deps", version));
    std::fs::write(&path, content)?;
    Ok(path)
  }

  /// Write build-meta.toml in the release directory
  pub fn write_config(&self, content: &str) -> Result<()> {
    std::fs::write(self.path.join("build-meta.toml"), content)?;
    Ok(())
  }

  pub fn collections_dir(&self) -> PathBuf {
    self.path.join("ansible_collections")
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }
}

/// Run ansible-build-meta and return its output regardless of exit status
pub fn run_build_meta_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_ansible-build-meta");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run ansible-build-meta")
}

/// Run ansible-build-meta, failing on a non-zero exit status
pub fn run_build_meta(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_build_meta_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "ansible-build-meta command failed: ansible-build-meta {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}
