//! Rendering of a new changelog entry block

use super::document::LineEnding;
use crate::version::Version;

/// Render `version`, `date` and free-form body text as entry lines
///
/// The block is the introducer `"{version} ({date})"`, one line per body line,
/// then a single blank separator. Trailing blank body lines are dropped so the
/// separator is never doubled; leading and interior ones are kept as given.
/// Bullet markers are expected in the body but not enforced.
pub fn format_entry(version: &Version, date: &str, body: &str, ending: LineEnding) -> Vec<String> {
  let eol = ending.as_str();

  let mut body_lines: Vec<&str> = body.lines().collect();
  while body_lines.last().is_some_and(|line| line.trim().is_empty()) {
    body_lines.pop();
  }

  let mut block = Vec::with_capacity(body_lines.len() + 2);
  block.push(format!("{} ({}){}", version, date, eol));
  block.extend(body_lines.into_iter().map(|line| format!("{}{}", line, eol)));
  block.push(eol.to_string());
  block
}
