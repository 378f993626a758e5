//! Per-release dependency files (`ansible-X.Y.Z.deps`)
//!
//! ```text
//! _ansible_version: 8.0.0
//! _ansible_core_version: 2.15.0
//! _python: >=3.9
//! amazon.aws: 6.0.1
//! community.general: 7.0.1
//! ```
//!
//! Reserved keys start with `_`; every other key is a bundled collection pinned
//! to an exact version.

use crate::core::error::{BuildError, BuildResult, ConfigurationError, ResultExt};
use crate::manifest::model::ReleaseMetadata;
use crate::manifest::version::ReleaseVersion;
use semver::Version;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const ANSIBLE_VERSION_KEY: &str = "_ansible_version";
const CORE_VERSION_KEY: &str = "_ansible_core_version";
const PYTHON_KEY: &str = "_python";

/// Parsed contents of a deps file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyData {
  pub ansible_version: String,
  pub ansible_core_version: String,
  /// Explicit `_python` requirement, if recorded
  pub python: Option<String>,
  /// Bundled collections, sorted by name
  pub collections: BTreeMap<String, Version>,
}

impl DependencyData {
  /// Load and parse a deps file
  pub fn load(path: &Path) -> BuildResult<Self> {
    if !path.exists() {
      return Err(ConfigurationError::NotFound {
        path: path.to_path_buf(),
      }
      .into());
    }
    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read deps file {}", path.display()))?;
    Self::parse(&content)
  }

  /// Parse deps file text
  pub fn parse(content: &str) -> BuildResult<Self> {
    let mut ansible_version = None;
    let mut ansible_core_version = None;
    let mut python = None;
    let mut collections = BTreeMap::new();

    for (index, line) in content.lines().enumerate() {
      let line = line.trim();
      if line.is_empty() || line.starts_with('#') {
        continue;
      }

      let Some((key, value)) = line.split_once(':') else {
        return Err(BuildError::with_help(
          format!("Malformed line {} in deps file: '{}'", index + 1, line),
          "Each line must have the form `name: version`",
        ));
      };
      let (key, value) = (key.trim(), value.trim().to_string());

      match key {
        ANSIBLE_VERSION_KEY => ansible_version = Some(value),
        CORE_VERSION_KEY => ansible_core_version = Some(value),
        PYTHON_KEY => python = Some(value),
        _ if key.starts_with('_') => {}
        collection => {
          let version = Version::parse(&value).map_err(|_| ConfigurationError::InvalidDependency {
            collection: collection.to_string(),
            version: value.clone(),
          })?;
          collections.insert(collection.to_string(), version);
        }
      }
    }

    let missing = |field: &str| ConfigurationError::MissingField {
      field: field.to_string(),
    };

    Ok(Self {
      ansible_version: ansible_version.ok_or_else(|| missing(ANSIBLE_VERSION_KEY))?,
      ansible_core_version: ansible_core_version.ok_or_else(|| missing(CORE_VERSION_KEY))?,
      python,
      collections,
    })
  }

  /// Supported Python range of the release
  ///
  /// Older deps files predate `_python`; for those the range follows from the
  /// ansible-core series (2.12/2.13 need 3.8+, 2.14 needs 3.9+).
  pub fn python_requires(&self) -> BuildResult<String> {
    if let Some(python) = &self.python {
      return Ok(python.clone());
    }

    let core = ReleaseVersion::parse(&self.ansible_core_version)?;
    if core.is_before_series(2, 14) {
      Ok(">=3.8".to_string())
    } else if core.is_before_series(2, 15) {
      Ok(">=3.9".to_string())
    } else {
      Err(
        ConfigurationError::MissingField {
          field: PYTHON_KEY.to_string(),
        }
        .into(),
      )
    }
  }

  /// Collection constraints in the form appended after the core requirement
  ///
  /// One comment line per collection documenting the compatible range; the
  /// collections ship inside the package, so they are not pip requirements.
  pub fn collection_deps(&self) -> String {
    self
      .collections
      .iter()
      .map(|(name, version)| format!("\n        # {}: >={},<{}.0.0", name, version, version.major + 1))
      .collect()
  }

  /// Assemble the generator's release metadata
  pub fn release_metadata(&self, core_package: &str) -> BuildResult<ReleaseMetadata> {
    Ok(ReleaseMetadata {
      version: self.ansible_version.clone(),
      python_requires: self.python_requires()?,
      core_package: core_package.to_string(),
      core_version: self.ansible_core_version.clone(),
      collection_deps: self.collection_deps(),
    })
  }
}
