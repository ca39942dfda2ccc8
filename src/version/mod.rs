//! Three-part release versions
//!
//! - **Version**: `MAJOR.MINOR.PATCH` with numeric ordering
//! - **extract**: locate the current version declared in a source file
//!
//! Versions here are deliberately stricter than semver: no pre-release or build
//! suffixes, and anything that is not exactly three digit runs is rejected.

pub mod extract;

pub use extract::extract_version;

use crate::core::error::VersionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A release version
///
/// Field order gives the derived `Ord` its major → minor → patch comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Version {
  pub major: u64,
  pub minor: u64,
  pub patch: u64,
}

impl Version {
  pub fn new(major: u64, minor: u64, patch: u64) -> Self {
    Self { major, minor, patch }
  }

  /// Parse `MAJOR.MINOR.PATCH`
  ///
  /// Fails with `VersionError::Malformed` unless the text splits on `.` into
  /// exactly three non-empty runs of ASCII digits that fit in a `u64`.
  pub fn parse(text: &str) -> Result<Self, VersionError> {
    let malformed = || VersionError::Malformed {
      input: text.to_string(),
    };

    let parts: Vec<&str> = text.split('.').collect();
    let [major, minor, patch] = parts.as_slice() else {
      return Err(malformed());
    };

    let component = |part: &str| -> Result<u64, VersionError> {
      if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
      }
      part.parse::<u64>().map_err(|_| malformed())
    };

    Ok(Self::new(component(major)?, component(minor)?, component(patch)?))
  }

  /// Next patch release; major and minor are left alone
  pub fn increment_patch(&self) -> Result<Self, VersionError> {
    let patch = self.patch.checked_add(1).ok_or_else(|| VersionError::Overflow {
      version: self.to_string(),
    })?;
    Ok(Self::new(self.major, self.minor, patch))
  }
}

impl fmt::Display for Version {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
  }
}

impl FromStr for Version {
  type Err = VersionError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}
