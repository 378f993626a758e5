//! Major-version buckets
//!
//! The packaging strategy of the meta-package changed over its history. Each
//! historical shape is one [`PackageLayout`] implementation, and the supported
//! Python range is one [`RuntimeSupport`] row. Both are picked once from the
//! release's major version by [`ReleaseStrategy::select`].
//!
//! | major   | layout                     | runtime rows            |
//! |---------|----------------------------|-------------------------|
//! | `< 5`   | flat, everything included  | 2.7, 3.5-3.7, 3.9, 3.10 |
//! | `5`     | flat, everything included  | 3.8-3.10                |
//! | `6`     | flat, curated excludes     | 3.8-3.10                |
//! | `7`     | flat, curated excludes     | 3.9-3.11                |
//! | `>= 8`  | namespace discovery        | 3.9-3.11                |

use crate::manifest::model::{COLLECTIONS_PACKAGE, CollectionInventory, PackageDiscovery};

/// First major version shipping a curated exclude list
pub const CURATED_EXCLUDES_SINCE: u64 = 6;
/// First major version using namespace package discovery
pub const NAMESPACE_DISCOVERY_SINCE: u64 = 8;
/// First major version supporting Python 3.8
pub const PYTHON_38_SINCE: u64 = 5;
/// First major version supporting Python 3.11 (and dropping 3.8)
pub const PYTHON_311_SINCE: u64 = 7;

/// Collection subtrees that never ship as packages under namespace discovery
const EXCLUDED_SUBPACKAGES: &[&str] = &["tests", "docs"];

/// Package layout of one major-version bucket
pub trait PackageLayout: Send + Sync {
  /// Short name for diagnostics and `--json` output
  fn name(&self) -> &'static str;

  /// Build the package discovery section for the given inventory
  fn discovery(&self, inventory: &CollectionInventory) -> PackageDiscovery;
}

/// Single flat package, all non-code files shipped wholesale
pub struct FlatLayout;

impl PackageLayout for FlatLayout {
  fn name(&self) -> &'static str {
    "flat"
  }

  fn discovery(&self, _inventory: &CollectionInventory) -> PackageDiscovery {
    PackageDiscovery::Flat {
      package: COLLECTIONS_PACKAGE.to_string(),
      exclude_package_data: None,
    }
  }
}

/// Single flat package with one exclude map built from the inventory's explicit excludes
pub struct CuratedFlatLayout;

impl PackageLayout for CuratedFlatLayout {
  fn name(&self) -> &'static str {
    "flat-curated"
  }

  fn discovery(&self, inventory: &CollectionInventory) -> PackageDiscovery {
    let exclude_package_data = inventory.has_excludes().then(|| {
      let paths = inventory.iter().flat_map(|e| e.excludes.iter().cloned()).collect();
      vec![(COLLECTIONS_PACKAGE.to_string(), paths)]
    });

    PackageDiscovery::Flat {
      package: COLLECTIONS_PACKAGE.to_string(),
      exclude_package_data,
    }
  }
}

/// Per-collection namespace packages without test and doc trees
pub struct NamespaceLayout;

impl PackageLayout for NamespaceLayout {
  fn name(&self) -> &'static str {
    "namespace"
  }

  fn discovery(&self, inventory: &CollectionInventory) -> PackageDiscovery {
    let include = vec![COLLECTIONS_PACKAGE.to_string(), format!("{}.*", COLLECTIONS_PACKAGE)];

    let mut exclude = Vec::new();
    let mut package_data = Vec::with_capacity(inventory.len());
    for entry in inventory.iter() {
      let package = entry.package();
      for sub in EXCLUDED_SUBPACKAGES {
        exclude.push(format!("{}.{}", package, sub));
        exclude.push(format!("{}.{}.*", package, sub));
      }

      let mut patterns = vec!["*".to_string()];
      for dir in &entry.directories {
        patterns.push(format!("{}/*", dir));
        patterns.push(format!("{}/.*", dir));
      }
      package_data.push((package, patterns));
    }

    PackageDiscovery::Namespace {
      include,
      exclude,
      package_data,
    }
  }
}

/// Supported Python interpreters of one major-version bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeSupport {
  /// Releases before 5: Python 2.7 and early 3.x
  Legacy,
  /// Releases 5 and 6: adds 3.8
  Python38,
  /// Releases 7 and later: adds 3.11
  Python311,
}

impl RuntimeSupport {
  pub fn for_major(major: u64) -> Self {
    if major < PYTHON_38_SINCE {
      RuntimeSupport::Legacy
    } else if major < PYTHON_311_SINCE {
      RuntimeSupport::Python38
    } else {
      RuntimeSupport::Python311
    }
  }

  /// Python versions in classifier order
  pub fn python_versions(self) -> Vec<&'static str> {
    let mut versions = Vec::new();
    if self == RuntimeSupport::Legacy {
      versions.extend(["2.7", "3.5", "3.6", "3.7"]);
    }
    if self == RuntimeSupport::Python38 {
      versions.push("3.8");
    }
    versions.extend(["3.9", "3.10"]);
    if self == RuntimeSupport::Python311 {
      versions.push("3.11");
    }
    versions
  }

  /// `Programming Language :: Python :: X.Y` classifiers
  pub fn classifiers(self) -> Vec<String> {
    self
      .python_versions()
      .into_iter()
      .map(|v| format!("Programming Language :: Python :: {}", v))
      .collect()
  }
}

/// Strategy for one release, selected once from its major version
pub struct ReleaseStrategy {
  pub layout: Box<dyn PackageLayout>,
  pub runtime: RuntimeSupport,
}

impl ReleaseStrategy {
  pub fn select(major: u64) -> Self {
    let layout: Box<dyn PackageLayout> = if major >= NAMESPACE_DISCOVERY_SINCE {
      Box::new(NamespaceLayout)
    } else if major >= CURATED_EXCLUDES_SINCE {
      Box::new(CuratedFlatLayout)
    } else {
      Box::new(FlatLayout)
    };

    Self {
      layout,
      runtime: RuntimeSupport::for_major(major),
    }
  }
}
