//! Integration tests for `ansible-build-meta verify`

use crate::helpers::{TestRelease, run_build_meta, run_build_meta_raw};
use anyhow::Result;

fn generate(release: &TestRelease, deps: &str) -> Result<()> {
  run_build_meta(
    &release.path,
    &["generate", "--deps", deps, "--collections-dir", "ansible_collections"],
  )?;
  Ok(())
}

#[test]
fn test_verify_reproducible_manifest() -> Result<()> {
  let release = TestRelease::new()?;
  release.add_collection("community.general", &["plugins"])?;
  let deps = release.write_deps("8.2.0", "2.15.8", &[("community.general", "7.5.3")])?;
  let deps = deps.to_str().unwrap();
  generate(&release, deps)?;

  let output = run_build_meta(
    &release.path,
    &[
      "verify",
      "--deps",
      deps,
      "--collections-dir",
      "ansible_collections",
      "--manifest",
      "setup.py",
      "--json",
    ],
  )?;

  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(json["reproducible"], true);
  let files = json["files"].as_array().unwrap();
  assert_eq!(files.len(), 2);
  assert!(files[1]["path"].as_str().unwrap().ends_with("MANIFEST.in"));
  for file in files {
    assert_eq!(file["reproducible"], true);
    assert_eq!(file["expected_sha256"], file["actual_sha256"]);
    assert!(file.get("first_difference").is_none());
  }

  Ok(())
}

#[test]
fn test_verify_detects_drift() -> Result<()> {
  let release = TestRelease::new()?;
  release.add_collection("community.general", &["plugins"])?;
  let deps = release.write_deps("7.0.0", "2.14.4", &[("community.general", "6.5.0")])?;
  let deps = deps.to_str().unwrap();
  generate(&release, deps)?;

  let edited = release.read_file("setup.py")?.replace("zip_safe=False", "zip_safe=True");
  std::fs::write(release.path.join("setup.py"), edited)?;

  let output = run_build_meta_raw(
    &release.path,
    &[
      "verify",
      "--deps",
      deps,
      "--collections-dir",
      "ansible_collections",
      "--manifest",
      "setup.py",
    ],
  )?;

  assert_eq!(output.status.code(), Some(3));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("does not reproduce"), "stderr: {}", stderr);
  assert!(stderr.contains("zip_safe=True"));

  Ok(())
}

#[test]
fn test_verify_reports_invalid_utf8_as_mismatch() -> Result<()> {
  let release = TestRelease::new()?;
  release.add_collection("community.general", &["plugins"])?;
  let deps = release.write_deps("8.0.0", "2.15.0", &[("community.general", "7.0.1")])?;
  let deps = deps.to_str().unwrap();
  generate(&release, deps)?;

  std::fs::write(release.path.join("setup.py"), b"\xff\xfe setup()\n")?;

  let output = run_build_meta_raw(
    &release.path,
    &[
      "verify",
      "--deps",
      deps,
      "--collections-dir",
      "ansible_collections",
      "--manifest",
      "setup.py",
    ],
  )?;

  assert_eq!(output.status.code(), Some(3));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("first difference at line 1"), "stderr: {}", stderr);
  assert!(!stderr.contains("I/O error"));

  Ok(())
}

#[test]
fn test_verify_checks_source_manifest() -> Result<()> {
  let release = TestRelease::new()?;
  release.add_collection("community.general", &["plugins"])?;
  let deps = release.write_deps("5.0.0", "2.12.5", &[("community.general", "4.8.0")])?;
  let deps = deps.to_str().unwrap();
  generate(&release, deps)?;

  let edited = release.read_file("MANIFEST.in")?.replace("include build-ansible.sh\n", "");
  std::fs::write(release.path.join("MANIFEST.in"), edited)?;

  let output = run_build_meta_raw(
    &release.path,
    &[
      "verify",
      "--deps",
      deps,
      "--collections-dir",
      "ansible_collections",
      "--manifest",
      "setup.py",
    ],
  )?;

  assert_eq!(output.status.code(), Some(3));
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("✅ setup.py reproduces"), "stdout: {}", stdout);
  assert!(stdout.contains("❌ MANIFEST.in does not reproduce"), "stdout: {}", stdout);
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("line 3"), "stderr: {}", stderr);

  Ok(())
}

#[test]
fn test_verify_detects_inventory_change() -> Result<()> {
  let release = TestRelease::new()?;
  release.add_collection("community.general", &["plugins"])?;
  let deps = release.write_deps("9.0.0", "2.16.7", &[("community.general", "9.0.1")])?;
  let deps = deps.to_str().unwrap();
  generate(&release, deps)?;

  release.add_collection("community.general", &["roles"])?;

  let output = run_build_meta_raw(
    &release.path,
    &[
      "verify",
      "--deps",
      deps,
      "--collections-dir",
      "ansible_collections",
      "--manifest",
      "setup.py",
    ],
  )?;
  assert_eq!(output.status.code(), Some(3));

  Ok(())
}

#[test]
fn test_verify_missing_manifest() -> Result<()> {
  let release = TestRelease::new()?;
  let deps = release.write_deps("8.0.0", "2.15.0", &[])?;

  let output = run_build_meta_raw(
    &release.path,
    &[
      "verify",
      "--deps",
      deps.to_str().unwrap(),
      "--collections-dir",
      "ansible_collections",
      "--manifest",
      "missing.py",
    ],
  )?;
  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("File not found"));

  Ok(())
}
