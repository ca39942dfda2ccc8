//! Version string rewriting in source files

use crate::core::config::{NEW_VERSION_PLACEHOLDER, Pattern};
use crate::core::error::ScribeResult;
use crate::version::Version;
use regex::Regex;
use std::sync::LazyLock;

/// Group reference following a backslash: `\1` or `\g<name>`
static GROUP_REF: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^(?:(\d{1,2})|g<(\w+)>)").expect("static regex"));

/// Result of applying a file's patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
  pub content: String,
  /// Total matches replaced across all patterns
  pub replacements: usize,
  /// Search patterns that matched nothing
  pub unmatched: Vec<String>,
}

/// Apply each pattern in order as a regex replace-all
///
/// Templates follow Python's `re.sub`: `$` is literal, groups are written
/// `\1` or `\g<name>`, and `{{new_version}}` becomes the new version.
pub fn substitute_version(content: &str, patterns: &[Pattern], new_version: &Version) -> ScribeResult<Substitution> {
  let version = new_version.to_string();
  let mut current = content.to_string();
  let mut replacements = 0;
  let mut unmatched = Vec::new();

  for pattern in patterns {
    let search = Regex::new(&pattern.search)?;
    let template = expansion(&pattern.replace, &version);

    let count = search.find_iter(&current).count();
    if count == 0 {
      unmatched.push(pattern.search.clone());
      continue;
    }

    current = search.replace_all(&current, template.as_str()).into_owned();
    replacements += count;
  }

  Ok(Substitution {
    content: current,
    replacements,
    unmatched,
  })
}

/// Build a `regex` replacement string from a template
///
/// The placeholder is split out before translating so a version never runs
/// into a preceding group number (`\1{{new_version}}`).
fn expansion(template: &str, version: &str) -> String {
  template
    .split(NEW_VERSION_PLACEHOLDER)
    .map(translate)
    .collect::<Vec<_>>()
    .join(version)
}

fn translate(piece: &str) -> String {
  let mut out = String::with_capacity(piece.len());
  let mut rest = piece;

  while let Some(c) = rest.chars().next() {
    rest = &rest[c.len_utf8()..];
    match c {
      '$' => out.push_str("$$"),
      '\\' => {
        if let Some(caps) = GROUP_REF.captures(rest) {
          let name = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
          out.push_str(&format!("${{{}}}", name));
          rest = &rest[caps[0].len()..];
          continue;
        }
        let escaped = match rest.chars().next() {
          Some('\\') => Some('\\'),
          Some('n') => Some('\n'),
          Some('t') => Some('\t'),
          Some('r') => Some('\r'),
          _ => None,
        };
        match escaped {
          Some(ch) => {
            out.push(ch);
            rest = &rest[1..];
          }
          None => out.push('\\'),
        }
      }
      other => out.push(other),
    }
  }
  out
}
