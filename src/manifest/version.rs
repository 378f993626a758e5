//! Release version parsing
//!
//! Ansible releases use PEP 440 style versions (`8.0.0`, `9.0.0a1`, `7.2.0rc1`)
//! which are not valid semver, so they get their own small parser. Only the
//! numeric release segments are interpreted; the pre/post/dev suffix is
//! validated and kept verbatim so the version renders exactly as it was given.

use crate::core::error::{BuildResult, ConfigurationError};
use serde::{Serialize, Serializer};
use std::fmt;

/// A parsed release version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
  raw: String,
  major: u64,
  minor: u64,
  patch: u64,
  suffix: String,
}

impl ReleaseVersion {
  /// Parse a version string
  ///
  /// Accepts `N[.N[.N]]` followed by an optional `aN`/`bN`/`rcN` pre-release,
  /// `.postN` and `.devN`, in that order. Anything else is rejected, so the
  /// version is safe to use as a path component.
  pub fn parse(input: &str) -> BuildResult<Self> {
    let raw = input.trim();
    let invalid = || ConfigurationError::InvalidVersion {
      value: input.to_string(),
    };

    let (major, mut rest) = split_number(raw).ok_or_else(invalid)?;
    let mut release = [0u64; 2];
    for slot in release.iter_mut() {
      let Some(after_dot) = rest.strip_prefix('.') else {
        break;
      };
      match split_number(after_dot) {
        Some((value, tail)) => {
          *slot = value;
          rest = tail;
        }
        None => break,
      }
    }

    if !is_release_suffix(rest) {
      return Err(invalid().into());
    }

    Ok(Self {
      raw: raw.to_string(),
      major,
      minor: release[0],
      patch: release[1],
      suffix: rest.to_string(),
    })
  }

  pub fn major(&self) -> u64 {
    self.major
  }

  #[cfg(test)]
  pub fn minor(&self) -> u64 {
    self.minor
  }

  #[cfg(test)]
  pub fn patch(&self) -> u64 {
    self.patch
  }

  /// Pre-release / post-release remainder (`a1`, `rc2`, `.post1`), empty for final releases
  #[cfg(test)]
  pub fn suffix(&self) -> &str {
    &self.suffix
  }

  /// Whether this version sorts before the given `major.minor` series
  pub fn is_before_series(&self, major: u64, minor: u64) -> bool {
    (self.major, self.minor) < (major, minor)
  }
}

/// Split a leading run of ASCII digits off `s`
fn split_number(s: &str) -> Option<(u64, &str)> {
  let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
  if end == 0 {
    return None;
  }
  let value = s[..end].parse().ok()?;
  Some((value, &s[end..]))
}

/// `[(a|b|rc)N][.postN][.devN]`
fn is_release_suffix(suffix: &str) -> bool {
  let mut rest = suffix;
  for marker in ["rc", "a", "b"] {
    if let Some(tail) = rest.strip_prefix(marker) {
      match split_number(tail) {
        Some((_, tail)) => rest = tail,
        None => return false,
      }
      break;
    }
  }
  for marker in [".post", ".dev"] {
    if let Some(tail) = rest.strip_prefix(marker) {
      match split_number(tail) {
        Some((_, tail)) => rest = tail,
        None => return false,
      }
    }
  }
  rest.is_empty()
}

impl fmt::Display for ReleaseVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.raw)
  }
}

impl Serialize for ReleaseVersion {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.raw)
  }
}
