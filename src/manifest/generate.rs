//! Manifest generation: release metadata + inventory -> packaging description

use crate::core::error::{BuildResult, ConfigurationError};
use crate::manifest::model::{
  CollectionInventory, Dependencies, PackagingDescription, ReleaseMetadata, STATIC_FIELDS,
};
use crate::manifest::strategy::ReleaseStrategy;
use crate::manifest::version::ReleaseVersion;

/// Classifiers before the Python version rows
const CLASSIFIERS_HEAD: &[&str] = &[
  "Development Status :: 5 - Production/Stable",
  "Environment :: Console",
  "Framework :: Ansible",
  "Intended Audience :: Developers",
  "Intended Audience :: Information Technology",
  "Intended Audience :: System Administrators",
  "License :: OSI Approved :: GNU General Public License v3 or later (GPLv3+)",
  "Natural Language :: English",
  "Operating System :: POSIX",
  "Programming Language :: Python",
];

/// Classifiers after the Python version rows
const CLASSIFIERS_TAIL: &[&str] = &[
  "Topic :: System :: Installation/Setup",
  "Topic :: System :: Systems Administration",
  "Topic :: Utilities",
];

/// Build the packaging description for a release
///
/// Pure and deterministic. Fails only when the metadata is unusable: a version
/// without a numeric major component or an empty required field.
pub fn generate(metadata: &ReleaseMetadata, inventory: &CollectionInventory) -> BuildResult<PackagingDescription> {
  let version = ReleaseVersion::parse(&metadata.version)?;
  require("python_requires", &metadata.python_requires)?;
  require("core_package", &metadata.core_package)?;
  require("core_version", &metadata.core_version)?;

  let strategy = ReleaseStrategy::select(version.major());

  let mut classifiers: Vec<String> = CLASSIFIERS_HEAD.iter().map(|c| c.to_string()).collect();
  classifiers.extend(strategy.runtime.classifiers());
  classifiers.extend(CLASSIFIERS_TAIL.iter().map(|c| c.to_string()));

  Ok(PackagingDescription {
    layout: strategy.layout.name(),
    python_requires: metadata.python_requires.trim().to_string(),
    discovery: strategy.layout.discovery(inventory),
    dependencies: Dependencies {
      core: format!("{} ~= {}", metadata.core_package.trim(), metadata.core_version.trim()),
      collection_deps: metadata.collection_deps.clone(),
    },
    classifiers,
    fields: STATIC_FIELDS,
    version,
  })
}

fn require(field: &str, value: &str) -> BuildResult<()> {
  if value.trim().is_empty() {
    return Err(ConfigurationError::MissingField { field: field.to_string() }.into());
  }
  Ok(())
}
