//! Unified diffs of planned file changes
//!
//! Uses `similar` for line-level diffing so dry-run output reads like
//! `git diff` and can be pasted into review comments.

use similar::{ChangeTag, TextDiff};

/// Lines of context around each hunk
const CONTEXT_LINES: usize = 3;

/// Render a unified diff between `original` and `updated`
///
/// Returns an empty string when the contents are identical.
pub fn unified_diff(path: &str, original: &str, updated: &str) -> String {
  if original == updated {
    return String::new();
  }

  let diff = TextDiff::from_lines(original, updated);
  diff
    .unified_diff()
    .context_radius(CONTEXT_LINES)
    .header(&format!("a/{}", path), &format!("b/{}", path))
    .to_string()
}

/// Number of (inserted, deleted) lines
pub fn count_changes(original: &str, updated: &str) -> (usize, usize) {
  let diff = TextDiff::from_lines(original, updated);
  diff.iter_all_changes().fold((0, 0), |(ins, del), change| match change.tag() {
    ChangeTag::Insert => (ins + 1, del),
    ChangeTag::Delete => (ins, del + 1),
    ChangeTag::Equal => (ins, del),
  })
}
