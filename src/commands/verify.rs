//! Verify command implementation
//!
//! Regenerates a release's manifests (`setup.py` and its `MANIFEST.in`) and
//! compares them byte for byte with the published ones.

use crate::commands::generate::ReleaseInputs;
use crate::core::error::{BuildResult, ConfigurationError, ResultExt, ValidationError};
use crate::utils::{first_difference, sha256_hex};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct VerifyReport {
  version: String,
  reproducible: bool,
  files: Vec<FileReport>,
}

#[derive(Debug, Serialize)]
struct FileReport {
  path: PathBuf,
  reproducible: bool,
  expected_sha256: String,
  actual_sha256: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  first_difference: Option<LineDifference>,
}

#[derive(Debug, Serialize)]
struct LineDifference {
  line: usize,
  expected: String,
  actual: String,
}

/// Run the verify command
pub fn run_verify(
  deps: PathBuf,
  collections_dir: PathBuf,
  config: Option<PathBuf>,
  manifest: PathBuf,
  json: bool,
) -> BuildResult<()> {
  let inputs = ReleaseInputs::load(&deps, &collections_dir, config.as_deref())?;
  let description = inputs.generate()?;
  let source_path = inputs.source_manifest_path(&manifest);

  let files = vec![
    compare_file(&manifest, &description.render())?,
    compare_file(&source_path, &inputs.source_manifest().render())?,
  ];
  let report = VerifyReport {
    version: description.version.to_string(),
    reproducible: files.iter().all(|f| f.reproducible),
    files,
  };

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    for file in &report.files {
      if file.reproducible {
        println!("✅ {} reproduces ansible {}", file.path.display(), report.version);
        println!("   SHA-256: {}", file.actual_sha256);
      } else {
        println!("❌ {} does not reproduce ansible {}", file.path.display(), report.version);
        println!("   expected SHA-256: {}", file.expected_sha256);
        println!("   actual SHA-256:   {}", file.actual_sha256);
      }
    }
  }

  match report.files.into_iter().find_map(|f| f.first_difference.map(|d| (f.path, d))) {
    None => Ok(()),
    Some((path, diff)) => Err(
      ValidationError::ManifestMismatch {
        path,
        line: diff.line,
        expected: diff.expected,
        actual: diff.actual,
      }
      .into(),
    ),
  }
}

/// Compare a file on disk with its regenerated text, byte for byte
fn compare_file(path: &Path, expected: &str) -> BuildResult<FileReport> {
  if !path.exists() {
    return Err(
      ConfigurationError::NotFound {
        path: path.to_path_buf(),
      }
      .into(),
    );
  }
  let actual = fs::read(path).with_context(|| format!("Failed to read manifest {}", path.display()))?;
  let expected = expected.as_bytes();

  Ok(FileReport {
    path: path.to_path_buf(),
    reproducible: expected == actual.as_slice(),
    expected_sha256: sha256_hex(expected),
    actual_sha256: sha256_hex(&actual),
    first_difference: first_difference(expected, &actual).map(|(line, expected, actual)| LineDifference {
      line,
      expected,
      actual,
    }),
  })
}
