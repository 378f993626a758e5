//! Inputs and output of the manifest generator

use crate::core::error::{BuildResult, ConfigurationError};
use crate::manifest::version::ReleaseVersion;
use serde::{Deserialize, Serialize};

/// Top-level package every collection lives under
pub const COLLECTIONS_PACKAGE: &str = "ansible_collections";

/// Release metadata supplied by the release workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseMetadata {
  /// Release version, e.g. `8.0.0` (parsed at generation time)
  pub version: String,
  /// Supported Python range, e.g. `>=3.9`
  pub python_requires: String,
  /// Name of the core runtime package, e.g. `ansible-core`
  pub core_package: String,
  /// Version the core dependency is pinned compatible to
  pub core_version: String,
  /// Pre-serialized collection constraints, appended verbatim after the core dependency
  #[serde(default)]
  pub collection_deps: String,
}

/// One collection in the inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionEntry {
  pub name: String,
  /// Auxiliary data directories shipped with the collection
  pub directories: Vec<String>,
  /// Explicit exclude paths relative to `ansible_collections/` (curated releases only)
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub excludes: Vec<String>,
}

impl CollectionEntry {
  /// Python package name of the collection (`ansible_collections.<ns>.<name>`)
  pub fn package(&self) -> String {
    format!("{}.{}", COLLECTIONS_PACKAGE, self.name)
  }
}

/// Ordered set of collections bundled in a release
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CollectionInventory {
  entries: Vec<CollectionEntry>,
}

impl CollectionInventory {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a collection; names must be unique and of the form `namespace.name`
  pub fn insert(&mut self, name: impl Into<String>, directories: Vec<String>) -> BuildResult<()> {
    let name = name.into();
    validate_collection_name(&name)?;
    if self.contains(&name) {
      return Err(ConfigurationError::DuplicateCollection { name }.into());
    }
    self.entries.push(CollectionEntry {
      name,
      directories,
      excludes: Vec::new(),
    });
    Ok(())
  }

  /// Builder form of [`insert`](Self::insert)
  #[cfg(test)]
  pub fn with_collection(mut self, name: &str, directories: &[&str]) -> BuildResult<Self> {
    self.insert(name, directories.iter().map(|d| d.to_string()).collect())?;
    Ok(self)
  }

  /// Attach explicit exclude paths to a collection already in the inventory
  pub fn set_excludes(&mut self, name: &str, excludes: Vec<String>) -> BuildResult<()> {
    let entry = self
      .entries
      .iter_mut()
      .find(|e| e.name == name)
      .ok_or_else(|| ConfigurationError::UnknownCollection { name: name.to_string() })?;
    entry.excludes = excludes;
    Ok(())
  }

  pub fn contains(&self, name: &str) -> bool {
    self.entries.iter().any(|e| e.name == name)
  }

  #[cfg(test)]
  pub fn get(&self, name: &str) -> Option<&CollectionEntry> {
    self.entries.iter().find(|e| e.name == name)
  }

  pub fn iter(&self) -> impl Iterator<Item = &CollectionEntry> {
    self.entries.iter()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Whether any collection declares explicit exclude paths
  pub fn has_excludes(&self) -> bool {
    self.entries.iter().any(|e| !e.excludes.is_empty())
  }
}

fn validate_collection_name(name: &str) -> BuildResult<()> {
  let valid_part = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
  match name.split_once('.') {
    Some((namespace, collection)) if valid_part(namespace) && valid_part(collection) => Ok(()),
    _ => Err(ConfigurationError::InvalidCollectionName { name: name.to_string() }.into()),
  }
}

/// How setuptools finds the packages to ship
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum PackageDiscovery {
  /// `find_namespace_packages(include=..., exclude=...)` plus per-collection `package_data`
  #[serde(rename = "namespace-discovery")]
  Namespace {
    include: Vec<String>,
    exclude: Vec<String>,
    package_data: Vec<(String, Vec<String>)>,
  },
  /// A single top-level package with optional `exclude_package_data`
  #[serde(rename = "flat-list")]
  Flat {
    package: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    exclude_package_data: Option<Vec<(String, Vec<String>)>>,
  },
}

impl PackageDiscovery {
  pub fn is_namespace(&self) -> bool {
    matches!(self, PackageDiscovery::Namespace { .. })
  }
}

/// `install_requires` contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependencies {
  /// `<core_package> ~= <core_version>`
  pub core: String,
  /// Appended verbatim after the core requirement
  pub collection_deps: String,
}

/// Fields of the manifest that never change between releases
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticFields {
  pub name: &'static str,
  pub description: &'static str,
  pub author: &'static str,
  pub author_email: &'static str,
  pub url: &'static str,
  pub project_urls: &'static [(&'static str, &'static str)],
  pub license: &'static str,
  pub console_scripts: &'static [&'static str],
}

pub const STATIC_FIELDS: StaticFields = StaticFields {
  name: "ansible",
  description: "Radically simple IT automation",
  author: "Ansible, Inc.",
  author_email: "info@ansible.com",
  url: "https://ansible.com/",
  project_urls: &[
    ("Build Data", "https://github.com/ansible-community/ansible-build-data"),
    ("Code of Conduct", "https://docs.ansible.com/ansible/latest/community/code_of_conduct.html"),
    ("Documentation", "https://docs.ansible.com/ansible/"),
    ("Mailing lists", "https://docs.ansible.com/ansible/latest/community/communication.html#mailing-list-information"),
    ("Source Code", "https://github.com/ansible-community/antsibull-build"),
  ],
  license: "GPLv3+",
  console_scripts: &["ansible-community=ansible_collections.ansible_community:main"],
};

/// Structured packaging description for one release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackagingDescription {
  pub version: ReleaseVersion,
  /// Name of the package layout that produced `discovery`
  pub layout: &'static str,
  pub python_requires: String,
  pub discovery: PackageDiscovery,
  pub dependencies: Dependencies,
  pub classifiers: Vec<String>,
  #[serde(rename = "static")]
  pub fields: StaticFields,
}
