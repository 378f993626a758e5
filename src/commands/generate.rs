//! Generate command implementation

use crate::core::config::BuildConfig;
use crate::core::error::{BuildResult, ResultExt};
use crate::manifest::{CollectionInventory, PackagingDescription, ReleaseMetadata, SourceManifest, generate};
use crate::release::{DependencyData, load_inventory};
use crate::utils::{sha256_hex, write_file};
use std::env;
use std::path::{Path, PathBuf};

/// Everything needed to generate one release's manifest
pub struct ReleaseInputs {
  pub config: BuildConfig,
  pub deps: DependencyData,
  pub metadata: ReleaseMetadata,
  pub inventory: CollectionInventory,
}

impl ReleaseInputs {
  /// Load config, deps file and collection tree
  pub fn load(deps_path: &Path, collections_dir: &Path, config_path: Option<&Path>) -> BuildResult<Self> {
    let workspace_root = env::current_dir()?;
    let config = BuildConfig::resolve(config_path, &workspace_root)?;
    let inventory = load_inventory(collections_dir, &config)?;
    Self::with_inventory(deps_path, config, inventory)
  }

  /// Load a deps file against an already scanned inventory
  pub fn with_inventory(deps_path: &Path, config: BuildConfig, inventory: CollectionInventory) -> BuildResult<Self> {
    let deps = DependencyData::load(deps_path)?;
    let metadata = deps
      .release_metadata(&config.package.core_package)
      .with_context(|| format!("Invalid release metadata in {}", deps_path.display()))?;
    Ok(Self {
      config,
      deps,
      metadata,
      inventory,
    })
  }

  /// Run the generator
  pub fn generate(&self) -> BuildResult<PackagingDescription> {
    generate(&self.metadata, &self.inventory)
  }

  /// Source distribution manifest shipped alongside the package manifest
  pub fn source_manifest(&self) -> SourceManifest {
    self.config.sdist.source_manifest()
  }

  /// Where the source manifest lives for a given package manifest path
  pub fn source_manifest_path(&self, manifest: &Path) -> PathBuf {
    source_manifest_path(&self.config, manifest)
  }

  /// Warnings about the inputs that do not stop generation
  pub fn warnings(&self) -> Vec<String> {
    let mut warnings = Vec::new();
    if self.inventory.is_empty() {
      warnings.push("Collection inventory is empty; the manifest will ship no collections".to_string());
    }
    for name in self.deps.collections.keys() {
      if !self.inventory.contains(name) {
        warnings.push(format!("{} is listed in the deps file but missing from the collections tree", name));
      }
    }
    for entry in self.inventory.iter() {
      if !self.deps.collections.is_empty() && !self.deps.collections.contains_key(&entry.name) {
        warnings.push(format!("{} is in the collections tree but not in the deps file", entry.name));
      }
    }
    warnings
  }
}

/// Run the generate command
pub fn run_generate(
  deps: PathBuf,
  collections_dir: PathBuf,
  config: Option<PathBuf>,
  out: Option<PathBuf>,
  stdout: bool,
  json: bool,
) -> BuildResult<()> {
  let inputs = ReleaseInputs::load(&deps, &collections_dir, config.as_deref())?;

  for warning in inputs.warnings() {
    eprintln!("⚠️  {}", warning);
  }

  let description = inputs.generate()?;

  if json {
    println!("{}", serde_json::to_string_pretty(&description)?);
    return Ok(());
  }

  let text = description.render();
  if stdout {
    print!("{}", text);
    return Ok(());
  }

  let path = match out {
    Some(path) => path,
    None => env::current_dir()?.join(&inputs.config.package.output),
  };
  write_file(&path, &text)?;
  let source_path = inputs.source_manifest_path(&path);
  write_file(&source_path, &inputs.source_manifest().render())?;

  println!("✅ Wrote {}", path.display());
  println!("   Sources:     {}", source_path.display());
  println!("   Release:     ansible {}", description.version);
  println!("   Collections: {}", inputs.inventory.len());
  println!("   Layout:      {} ({})", layout_label(&description), description.layout);
  println!("   SHA-256:     {}", sha256_hex(text.as_bytes()));

  Ok(())
}

/// `MANIFEST.in` sits in the same directory as `setup.py`
pub fn source_manifest_path(config: &BuildConfig, manifest: &Path) -> PathBuf {
  manifest
    .parent()
    .unwrap_or_else(|| Path::new(""))
    .join(&config.sdist.manifest)
}

/// Human-readable discovery mode
pub fn layout_label(description: &PackagingDescription) -> &'static str {
  if description.discovery.is_namespace() {
    "namespace-discovery"
  } else {
    "flat-list"
  }
}
