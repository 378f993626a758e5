//! Batch command implementation
//!
//! Generates the manifests of several releases in parallel against one
//! collections tree, e.g. to regenerate a range of historical releases.

use crate::commands::generate::{layout_label, source_manifest_path};
use crate::core::config::BuildConfig;
use crate::core::error::{BuildError, BuildResult, ResultExt};
use crate::manifest::{CollectionInventory, ReleaseMetadata, ReleaseVersion, generate};
use crate::release::{DependencyData, load_inventory};
use crate::ui::progress::BatchProgress;
use crate::utils::{sha256_hex, write_file};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

/// One successfully generated manifest
#[derive(Debug, Serialize)]
struct BatchEntry {
  deps: PathBuf,
  version: String,
  manifest: PathBuf,
  source_manifest: PathBuf,
  layout: &'static str,
  sha256: String,
}

/// Run the batch command
pub fn run_batch(
  deps: Vec<PathBuf>,
  collections_dir: PathBuf,
  config: Option<PathBuf>,
  out_dir: PathBuf,
  json: bool,
) -> BuildResult<()> {
  if deps.is_empty() {
    return Err(BuildError::with_help(
      "No deps files given",
      "Pass one or more --deps <file> arguments",
    ));
  }

  let workspace_root = env::current_dir()?;
  let config = BuildConfig::resolve(config.as_deref(), &workspace_root)?;
  let inventory = load_inventory(&collections_dir, &config)?;
  if inventory.is_empty() {
    eprintln!("⚠️  Collection inventory is empty; manifests will ship no collections");
  }

  let mut failures = Vec::new();
  let mut jobs = Vec::new();
  for path in &deps {
    match ReleaseJob::load(path, &config) {
      Ok(job) => jobs.push(job),
      Err(err) => failures.push((path.clone(), err)),
    }
  }
  check_unique_versions(&jobs)?;

  let progress = (!json).then(|| BatchProgress::new(jobs.len(), "Generating manifests"));

  let results: Vec<(PathBuf, BuildResult<BatchEntry>)> = jobs
    .par_iter()
    .map(|job| {
      let result = job.generate(&config, &inventory, &out_dir);
      if let Some(progress) = &progress {
        progress.inc();
      }
      (job.deps.clone(), result)
    })
    .collect();

  let mut entries = Vec::new();
  for (path, result) in results {
    match result {
      Ok(entry) => entries.push(entry),
      Err(err) => failures.push((path, err)),
    }
  }

  if json {
    println!("{}", serde_json::to_string_pretty(&entries)?);
  } else {
    println!();
    for entry in &entries {
      println!("✅ ansible {} → {} ({})", entry.version, entry.manifest.display(), entry.layout);
    }
  }

  for (path, err) in &failures {
    eprintln!("❌ {}: {}", path.display(), err);
  }

  if failures.is_empty() {
    Ok(())
  } else {
    Err(BuildError::message(format!(
      "{} of {} releases failed to generate",
      failures.len(),
      deps.len()
    )))
  }
}

/// A release whose deps file has been read, ready to generate
struct ReleaseJob {
  deps: PathBuf,
  version: ReleaseVersion,
  metadata: ReleaseMetadata,
}

impl ReleaseJob {
  fn load(deps_path: &Path, config: &BuildConfig) -> BuildResult<Self> {
    let context = || format!("Invalid release metadata in {}", deps_path.display());
    let metadata = DependencyData::load(deps_path)?
      .release_metadata(&config.package.core_package)
      .with_context(context)?;
    let version = ReleaseVersion::parse(&metadata.version).with_context(context)?;
    Ok(Self {
      deps: deps_path.to_path_buf(),
      version,
      metadata,
    })
  }

  fn generate(&self, config: &BuildConfig, inventory: &CollectionInventory, out_dir: &Path) -> BuildResult<BatchEntry> {
    let description = generate(&self.metadata, inventory)?;
    let text = description.render();

    let release_dir = out_dir.join(format!("ansible-{}", self.version));
    let manifest = release_dir.join(&config.package.output);
    write_file(&manifest, &text)?;
    let source_manifest = source_manifest_path(config, &manifest);
    write_file(&source_manifest, &config.sdist.source_manifest().render())?;

    Ok(BatchEntry {
      deps: self.deps.clone(),
      version: description.version.to_string(),
      layout: layout_label(&description),
      sha256: sha256_hex(text.as_bytes()),
      manifest,
      source_manifest,
    })
  }
}

/// Two deps files for the same release would write the same output directory
fn check_unique_versions(jobs: &[ReleaseJob]) -> BuildResult<()> {
  let mut seen: HashMap<String, &Path> = HashMap::new();
  for job in jobs {
    if let Some(first) = seen.insert(job.version.to_string(), job.deps.as_path()) {
      return Err(BuildError::with_help(
        format!(
          "{} and {} both describe ansible {}",
          first.display(),
          job.deps.display(),
          job.version
        ),
        "Pass each release's deps file only once",
      ));
    }
  }
  Ok(())
}
