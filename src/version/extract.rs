//! Current-version lookup in a source file
//!
//! Two declaration shapes are recognized, tried in order over the whole text:
//!
//! 1. a labeled header field: `Version: 1.0.2`
//! 2. a constant definition: `define( 'MY_PLUGIN_VERSION', '1.0.2' )`

use crate::core::error::VersionError;
use regex::Regex;
use std::sync::LazyLock;

static HEADER_FIELD: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"Version:\s+([0-9]+\.[0-9]+\.[0-9]+)").expect("static regex"));

static CONSTANT_DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"define\(\s*['"]\w*VERSION['"]\s*,\s*['"]([0-9]+\.[0-9]+\.[0-9]+)['"]\s*\)"#).expect("static regex")
});

/// Return the version text of the first recognized declaration
///
/// `location` only labels the error; nothing is read from disk here.
pub fn extract_version<'a>(text: &'a str, location: &str) -> Result<&'a str, VersionError> {
  [&*HEADER_FIELD, &*CONSTANT_DEFINITION]
    .into_iter()
    .find_map(|pattern| pattern.captures(text).and_then(|caps| caps.get(1)))
    .map(|m| m.as_str())
    .ok_or_else(|| VersionError::NotFound {
      location: location.to_string(),
    })
}
