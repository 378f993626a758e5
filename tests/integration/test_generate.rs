//! Integration tests for `ansible-build-meta generate`

use crate::helpers::{TestRelease, run_build_meta, run_build_meta_raw};
use anyhow::Result;

#[test]
fn test_generate_namespace_manifest() -> Result<()> {
  let release = TestRelease::new()?;
  release.add_collection("community.general", &["plugins", "roles", "tests", "docs"])?;
  release.add_collection("ansible.posix", &[])?;
  let deps = release.write_deps("8.0.0", "2.15.0", &[("community.general", "7.0.1"), ("ansible.posix", "1.5.4")])?;

  let output = run_build_meta(
    &release.path,
    &[
      "generate",
      "--deps",
      deps.to_str().unwrap(),
      "--collections-dir",
      "ansible_collections",
    ],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("namespace-discovery"), "stdout: {}", stdout);

  assert!(release.file_exists("setup.py"));
  let manifest = release.read_file("setup.py")?;
  assert!(manifest.contains("version='8.0.0',"));
  assert!(manifest.contains("python_requires='>=3.9',"));
  assert!(manifest.contains("'ansible_collections.community.general.tests.*',"));
  assert!(manifest.contains("'plugins/.*',"));
  assert!(manifest.contains("'roles/*',"));
  assert!(!manifest.contains("'tests/*',"));
  assert!(manifest.contains("'ansible-core ~= 2.15.0',"));
  assert!(manifest.contains("# community.general: >=7.0.1,<8.0.0"));
  assert!(manifest.contains("'Programming Language :: Python :: 3.11',"));

  let source_manifest = release.read_file("MANIFEST.in")?;
  assert!(source_manifest.starts_with("include COPYING\n"));
  assert!(source_manifest.ends_with("recursive-include ansible_collections/ **\n"));

  Ok(())
}

#[test]
fn test_generate_curated_excludes_from_config() -> Result<()> {
  let release = TestRelease::new()?;
  release.add_collection("community.general", &["plugins"])?;
  release.write_config(
    r#"
[excludes]
"community.general" = ["community/general/tests/*"]
"#,
  )?;
  let deps = release.write_deps("6.5.0", "2.13.8", &[("community.general", "5.8.0")])?;

  run_build_meta(
    &release.path,
    &[
      "generate",
      "--deps",
      deps.to_str().unwrap(),
      "--collections-dir",
      "ansible_collections",
      "--out",
      "build/setup.py",
    ],
  )?;

  assert!(release.file_exists("build/MANIFEST.in"));
  let manifest = release.read_file("build/setup.py")?;
  assert!(manifest.contains("packages=['ansible_collections'],"));
  assert!(manifest.contains("exclude_package_data={\n        'ansible_collections': [\n            'community/general/tests/*',"));
  assert!(manifest.contains("'Programming Language :: Python :: 3.8',"));
  assert!(!manifest.contains("find_namespace_packages"));

  Ok(())
}

#[test]
fn test_generate_stdout_matches_file() -> Result<()> {
  let release = TestRelease::new()?;
  release.add_collection("community.general", &["plugins"])?;
  let deps = release.write_deps("9.1.0", "2.16.8", &[("community.general", "9.1.0")])?;
  let deps = deps.to_str().unwrap();

  let output = run_build_meta(
    &release.path,
    &["generate", "--deps", deps, "--collections-dir", "ansible_collections", "--stdout"],
  )?;
  assert!(!release.file_exists("setup.py"));
  assert!(!release.file_exists("MANIFEST.in"));

  run_build_meta(
    &release.path,
    &["generate", "--deps", deps, "--collections-dir", "ansible_collections"],
  )?;
  assert_eq!(String::from_utf8(output.stdout)?, release.read_file("setup.py")?);

  Ok(())
}

#[test]
fn test_generate_json_output() -> Result<()> {
  let release = TestRelease::new()?;
  release.add_collection("community.general", &["plugins"])?;
  let deps = release.write_deps("4.10.0", "2.11.12", &[("community.general", "3.8.10")])?;

  let output = run_build_meta(
    &release.path,
    &[
      "generate",
      "--deps",
      deps.to_str().unwrap(),
      "--collections-dir",
      "ansible_collections",
      "--json",
    ],
  )?;

  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(json["version"], "4.10.0");
  assert_eq!(json["discovery"]["mode"], "flat-list");
  assert!(json["discovery"].get("exclude_package_data").is_none());
  let classifiers = json["classifiers"].as_array().unwrap();
  assert!(classifiers.iter().any(|c| c == "Programming Language :: Python :: 2.7"));
  assert!(!classifiers.iter().any(|c| c == "Programming Language :: Python :: 3.8"));

  Ok(())
}

#[test]
fn test_generate_rejects_malformed_version() -> Result<()> {
  let release = TestRelease::new()?;
  release.add_collection("community.general", &[])?;
  let deps = release.write_deps("next", "2.15.0", &[])?;

  let output = run_build_meta_raw(
    &release.path,
    &[
      "generate",
      "--deps",
      deps.to_str().unwrap(),
      "--collections-dir",
      "ansible_collections",
    ],
  )?;

  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid release version 'next'"));
  assert!(!release.file_exists("setup.py"));

  Ok(())
}

#[test]
fn test_generate_warns_on_empty_inventory() -> Result<()> {
  let release = TestRelease::new()?;
  let deps = release.write_deps("8.0.0", "2.15.0", &[])?;

  let output = run_build_meta(
    &release.path,
    &[
      "generate",
      "--deps",
      deps.to_str().unwrap(),
      "--collections-dir",
      "ansible_collections",
    ],
  )?;

  assert!(String::from_utf8_lossy(&output.stderr).contains("inventory is empty"));
  assert!(release.read_file("setup.py")?.contains("package_data={},"));

  Ok(())
}

#[test]
fn test_generate_source_manifest_from_config() -> Result<()> {
  let release = TestRelease::new()?;
  release.add_collection("community.general", &["plugins"])?;
  release.write_config(
    r#"
[sdist]
manifest = "MANIFEST-ansible.in"
include = ["CHANGELOG-v4.rst", "porting_guide_4.rst"]
debian = true
tags_file = true
"#,
  )?;
  let deps = release.write_deps("4.2.0", "2.11.3", &[("community.general", "3.4.0")])?;

  run_build_meta(
    &release.path,
    &[
      "generate",
      "--deps",
      deps.to_str().unwrap(),
      "--collections-dir",
      "ansible_collections",
    ],
  )?;

  assert!(!release.file_exists("MANIFEST.in"));
  assert_eq!(
    release.read_file("MANIFEST-ansible.in")?,
    "include COPYING\n\
     include README.rst\n\
     include build-ansible.sh\n\
     include CHANGELOG-v4.rst\n\
     include porting_guide_4.rst\n\
     include debian/*\n\
     include tags.yaml\n\
     recursive-include ansible_collections/ **\n"
  );
  assert!(release.read_file("setup.py")?.contains("include_package_data=True,"));

  Ok(())
}

#[test]
fn test_generate_rejects_version_with_path_separators() -> Result<()> {
  let release = TestRelease::new()?;
  release.add_collection("community.general", &[])?;
  let deps = release.path.join("ansible-escape.deps");
  std::fs::write(
    &deps,
    "_ansible_version: 8.0.0/../../escaped\n_ansible_core_version: 2.15.0\n_python: >=3.9\n",
  )?;

  let output = run_build_meta_raw(
    &release.path,
    &[
      "generate",
      "--deps",
      deps.to_str().unwrap(),
      "--collections-dir",
      "ansible_collections",
    ],
  )?;

  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid release version '8.0.0/../../escaped'"));
  assert!(!release.file_exists("setup.py"));

  Ok(())
}
