//! `MANIFEST.in` rendering
//!
//! The flat layouts rely on `include_package_data=True`, which only picks up
//! files that the source distribution lists. The source manifest lists the
//! release's top-level files and the whole `ansible_collections/` tree.

use std::fmt;

/// Well-known source manifest file name
pub const MANIFEST_IN_FILE: &str = "MANIFEST.in";

/// Top-level files every release ships
const BASE_FILES: &[&str] = &["COPYING", "README.rst", "build-ansible.sh"];

/// Files the source distribution ships besides the Python packages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceManifest {
  /// Release-specific top-level files (changelog, porting guide), in order
  pub extra_files: Vec<String>,
  /// Ship the `debian/` packaging directory
  pub debian: bool,
  /// Ship the collection tag data file
  pub tags_file: bool,
}

impl SourceManifest {
  /// Render the manifest text
  pub fn render(&self) -> String {
    self.to_string()
  }
}

impl fmt::Display for SourceManifest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for file in BASE_FILES.iter().copied().chain(self.extra_files.iter().map(String::as_str)) {
      writeln!(f, "include {}", file)?;
    }
    if self.debian {
      writeln!(f, "include debian/*")?;
    }
    if self.tags_file {
      writeln!(f, "include tags.yaml")?;
    }
    writeln!(f, "recursive-include ansible_collections/ **")
  }
}
