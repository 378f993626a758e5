use crate::core::error::{BuildError, BuildResult, ConfigurationError, ResultExt};
use crate::manifest::{MANIFEST_FILE, MANIFEST_IN_FILE, SourceManifest};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for ansible-build-meta
/// Searched in order: build-meta.toml, .build-meta.toml, .config/build-meta.toml
///
/// # Example
///
/// ```toml
/// [package]
/// core_package = "ansible-core"
/// output = "setup.py"
///
/// [sdist]
/// include = ["CHANGELOG-v8.rst", "porting_guide_8.rst"]
/// debian = true
///
/// [excludes]
/// "community.general" = ["community/general/tests/*"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildConfig {
  #[serde(default)]
  pub package: PackageConfig,

  #[serde(default)]
  pub sdist: SdistConfig,

  /// Curated exclude paths per collection, relative to `ansible_collections/`
  /// (used by the 6.x and 7.x packaging layout)
  #[serde(default)]
  pub excludes: BTreeMap<String, Vec<String>>,

  /// File this configuration was loaded from
  #[serde(skip)]
  pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageConfig {
  /// Name of the core runtime package (default: "ansible-core")
  #[serde(default = "default_core_package")]
  pub core_package: String,

  /// Manifest file name written next to the collections (default: "setup.py")
  #[serde(default = "default_output")]
  pub output: String,
}

/// Source distribution manifest (`MANIFEST.in`) written next to the package manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdistConfig {
  /// File name (default: "MANIFEST.in")
  #[serde(default = "default_manifest_in")]
  pub manifest: String,

  /// Extra top-level files to ship, e.g. the release's changelog and porting guide
  #[serde(default)]
  pub include: Vec<String>,

  /// Ship the `debian/` directory
  #[serde(default)]
  pub debian: bool,

  /// Ship `tags.yaml`
  #[serde(default)]
  pub tags_file: bool,
}

impl Default for SdistConfig {
  fn default() -> Self {
    Self {
      manifest: default_manifest_in(),
      include: Vec::new(),
      debian: false,
      tags_file: false,
    }
  }
}

impl SdistConfig {
  pub fn source_manifest(&self) -> SourceManifest {
    SourceManifest {
      extra_files: self.include.clone(),
      debian: self.debian,
      tags_file: self.tags_file,
    }
  }
}

fn default_manifest_in() -> String {
  MANIFEST_IN_FILE.to_string()
}

fn default_core_package() -> String {
  "ansible-core".to_string()
}

fn default_output() -> String {
  MANIFEST_FILE.to_string()
}

impl Default for PackageConfig {
  fn default() -> Self {
    Self {
      core_package: default_core_package(),
      output: default_output(),
    }
  }
}

impl BuildConfig {
  /// Find config file in search order: build-meta.toml, .build-meta.toml, .config/build-meta.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("build-meta.toml"),
      path.join(".build-meta.toml"),
      path.join(".config").join("build-meta.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load an explicit config file, or search `dir`; falls back to defaults when nothing is found
  pub fn resolve(explicit: Option<&Path>, dir: &Path) -> BuildResult<Self> {
    match explicit {
      Some(path) if !path.exists() => Err(
        ConfigurationError::NotFound {
          path: path.to_path_buf(),
        }
        .into(),
      ),
      Some(path) => Self::load_file(path),
      None => match Self::find_config_path(dir) {
        Some(path) => Self::load_file(&path),
        None => Ok(Self::default()),
      },
    }
  }

  /// Load config from a specific file
  pub fn load_file(config_path: &Path) -> BuildResult<Self> {
    let content = fs::read_to_string(config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let mut config = Self::parse(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;
    config.source = Some(config_path.to_path_buf());
    Ok(config)
  }

  /// Parse config text
  pub fn parse(content: &str) -> BuildResult<Self> {
    let config: BuildConfig = toml_edit::de::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Validate configuration values
  pub fn validate(&self) -> BuildResult<()> {
    if self.package.core_package.trim().is_empty() {
      return Err(
        ConfigurationError::MissingField {
          field: "package.core_package".to_string(),
        }
        .into(),
      );
    }
    if self.package.output.trim().is_empty() {
      return Err(
        ConfigurationError::MissingField {
          field: "package.output".to_string(),
        }
        .into(),
      );
    }
    if self.sdist.manifest.trim().is_empty() {
      return Err(
        ConfigurationError::MissingField {
          field: "sdist.manifest".to_string(),
        }
        .into(),
      );
    }
    // MANIFEST.in splits include arguments on whitespace
    if let Some(file) = self
      .sdist
      .include
      .iter()
      .find(|f| f.is_empty() || f.chars().any(|c| c.is_whitespace() || c.is_control()))
    {
      return Err(BuildError::with_help(
        format!("Invalid [sdist] include entry {:?}", file),
        "Each entry must be a single file name or glob without whitespace",
      ));
    }
    Ok(())
  }

  /// Human-readable origin of this configuration
  pub fn source_name(&self) -> String {
    self
      .source
      .as_ref()
      .map(|p| p.display().to_string())
      .unwrap_or_else(|| "built-in defaults".to_string())
  }
}
