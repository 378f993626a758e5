//! Utility functions for manifest comparison and file output

use crate::core::error::{BuildResult, ResultExt};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Hex-encoded SHA-256 digest of a manifest
pub fn sha256_hex(content: &[u8]) -> String {
  let digest = Sha256::digest(content);
  digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// First differing line between two byte strings (1-based), with both sides
///
/// Returns `None` when the inputs are byte-identical. Lines are shown with
/// invalid UTF-8 replaced. A missing line on one side is reported as
/// `<end of file>`; differences in the trailing newline are reported on the
/// line after the last one.
pub fn first_difference(expected: &[u8], actual: &[u8]) -> Option<(usize, String, String)> {
  if expected == actual {
    return None;
  }

  let mut expected_lines = expected.split_inclusive(|b| *b == b'\n');
  let mut actual_lines = actual.split_inclusive(|b| *b == b'\n');
  let mut line = 1;
  loop {
    match (expected_lines.next(), actual_lines.next()) {
      (Some(e), Some(a)) if e == a => line += 1,
      (e, a) => {
        let show = |s: Option<&[u8]>| match s {
          Some(s) => format!("{:?}", String::from_utf8_lossy(s)),
          None => "<end of file>".to_string(),
        };
        return Some((line, show(e), show(a)));
      }
    }
  }
}

/// Write a file, creating parent directories as needed
pub fn write_file(path: &Path, content: &str) -> BuildResult<()> {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create directory {}", parent.display()))?;
  }
  fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(())
}
