//! Release marker handling for pull request titles

use regex::{Regex, RegexBuilder};

fn marker_regex(marker: &str, anchored: bool) -> Regex {
  let escaped = regex::escape(marker);
  let pattern = if anchored { format!("^{}", escaped) } else { escaped };
  RegexBuilder::new(&pattern)
    .case_insensitive(true)
    .build()
    .expect("escaped literal is a valid regex")
}

/// Whether `title` starts with the release marker, ignoring case
pub fn is_release_title(title: &str, marker: &str) -> bool {
  marker_regex(marker, true).is_match(title)
}

/// Title with every occurrence of the marker removed, trimmed
pub fn clean_title(title: &str, marker: &str) -> String {
  marker_regex(marker, false).replace_all(title, "").trim().to_string()
}
