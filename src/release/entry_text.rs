//! Changelog body acquisition
//!
//! The body of a new entry comes from the first source that has something to
//! say. Sources implement `EntryGenerator`; an external text-generation service
//! would plug in at the same seam. When every source is `Unavailable` the
//! caller falls back to the cleaned-up pull request title.

use super::gate::clean_title;
use regex::Regex;
use std::sync::LazyLock;

/// `- [x] item` / `* [X] item`, any indentation
static CHECKED_ITEM: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^\s*[-*+]\s+\[[xX]\]\s+(.+?)\s*$").expect("static regex"));

/// Pull request data an entry can be derived from
#[derive(Debug, Clone, Default)]
pub struct EntryRequest<'a> {
  pub title: &'a str,
  pub description: &'a str,
  pub changed_files: &'a [String],
  /// Already cut to the configured budget
  pub diff: &'a str,
}

/// Result of asking a source for entry text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryText {
  Provided(String),
  Unavailable,
}

/// A source of changelog body text
pub trait EntryGenerator {
  /// Short label for logs and plan output
  fn name(&self) -> &'static str;

  fn generate(&self, request: &EntryRequest<'_>) -> EntryText;
}

/// Pre-written change notes (e.g. extracted by an earlier CI step)
pub struct ChangeNotes(pub Option<String>);

impl EntryGenerator for ChangeNotes {
  fn name(&self) -> &'static str {
    "change notes"
  }

  fn generate(&self, _request: &EntryRequest<'_>) -> EntryText {
    match &self.0 {
      Some(text) if !text.trim().is_empty() => EntryText::Provided(text.trim_end().to_string()),
      _ => EntryText::Unavailable,
    }
  }
}

/// Checked checklist items from the pull request description
pub struct ChecklistItems;

impl EntryGenerator for ChecklistItems {
  fn name(&self) -> &'static str {
    "description checklist"
  }

  fn generate(&self, request: &EntryRequest<'_>) -> EntryText {
    let items = checklist_items(request.description);
    if items.is_empty() {
      EntryText::Unavailable
    } else {
      EntryText::Provided(items.iter().map(|item| format!("- {}", item)).collect::<Vec<_>>().join("\n"))
    }
  }
}

/// Text of every checked checklist item, in order
pub fn checklist_items(description: &str) -> Vec<&str> {
  description
    .lines()
    .filter_map(|line| CHECKED_ITEM.captures(line).and_then(|c| c.get(1)))
    .map(|m| m.as_str())
    .collect()
}

/// Deterministic body used when no source provides one
pub fn fallback_entry(title: &str, marker: &str) -> String {
  format!("- {}", clean_title(title, marker))
}

/// First `max_chars` characters of `diff`
pub fn truncate_diff(diff: &str, max_chars: usize) -> &str {
  match diff.char_indices().nth(max_chars) {
    Some((byte_index, _)) => &diff[..byte_index],
    None => diff,
  }
}

/// Body text plus the name of the source that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
  pub body: String,
  pub source: &'static str,
}

/// Ask each generator in turn, falling back to the cleaned title
pub fn resolve_entry(generators: &[&dyn EntryGenerator], request: &EntryRequest<'_>, marker: &str) -> ResolvedEntry {
  tracing::debug!(
    changed_files = request.changed_files.len(),
    diff_chars = request.diff.chars().count(),
    "resolving changelog entry"
  );
  for generator in generators {
    if let EntryText::Provided(body) = generator.generate(request) {
      return ResolvedEntry {
        body,
        source: generator.name(),
      };
    }
    tracing::debug!(source = generator.name(), "entry source unavailable");
  }

  ResolvedEntry {
    body: fallback_entry(request.title, marker),
    source: "pull request title",
  }
}
