//! Integration tests for `ansible-build-meta inventory`

use crate::helpers::{TestRelease, run_build_meta, run_build_meta_raw};
use anyhow::Result;

#[test]
fn test_inventory_json() -> Result<()> {
  let release = TestRelease::new()?;
  release.add_collection("community.general", &["plugins", "tests"])?;
  release.add_collection("amazon.aws", &["meta"])?;

  let output = run_build_meta(
    &release.path,
    &["inventory", "--collections-dir", "ansible_collections", "--json"],
  )?;

  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  let entries = json.as_array().unwrap();
  assert_eq!(entries.len(), 2);
  assert_eq!(entries[0]["name"], "amazon.aws");
  assert_eq!(entries[1]["name"], "community.general");
  assert_eq!(entries[1]["directories"], serde_json::json!(["plugins"]));

  Ok(())
}

#[test]
fn test_inventory_with_config_excludes() -> Result<()> {
  let release = TestRelease::new()?;
  release.add_collection("community.general", &["plugins"])?;
  release.write_config("[excludes]\n\"community.general\" = [\"community/general/tests/*\"]\n")?;

  let output = run_build_meta(&release.path, &["inventory", "--collections-dir", "ansible_collections"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("community.general"));
  assert!(stdout.contains("exclude: community/general/tests/*"));

  Ok(())
}

#[test]
fn test_inventory_unknown_excluded_collection() -> Result<()> {
  let release = TestRelease::new()?;
  release.add_collection("community.general", &["plugins"])?;
  release.write_config("[excludes]\n\"cisco.ios\" = [\"cisco/ios/tests/*\"]\n")?;

  let output = run_build_meta_raw(&release.path, &["inventory", "--collections-dir", "ansible_collections"])?;
  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("cisco.ios"));
  assert!(stderr.contains("Invalid [excludes] entry in"), "stderr: {}", stderr);
  assert!(stderr.contains("💡 Help: Remove 'cisco.ios'"));

  Ok(())
}
