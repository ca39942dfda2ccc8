//! Changelog insertion engine
//!
//! Places a new dated entry into an existing document:
//!
//! 1. Find the header pair; without it nothing is touched.
//! 2. Collect the entry introducers below the header.
//! 3. No entries: insert right after the header, past any blank lines.
//!    Otherwise: insert at the introducer of the numerically highest version,
//!    so the new (necessarily newer) release sits on top of it even when the
//!    file is out of order.
//! 4. Splice in the formatted block; every other line is left as it was.

use super::document::{ChangelogDocument, EntryLine, is_blank};
use super::entry::format_entry;
use crate::core::error::ChangelogError;
use crate::version::Version;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

/// Where a new entry went
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insertion {
  /// Index of the new introducer line in the updated document
  pub line: usize,
  /// Number of lines added
  pub added: usize,
  /// Highest version present before the insertion, if any
  pub above: Option<Version>,
}

/// Highest version among `entries`, earliest in the document on ties
pub fn highest_entry(entries: &[EntryLine]) -> Option<&EntryLine> {
  let mut ranked: Vec<&EntryLine> = entries.iter().collect();
  // Stable: equal versions keep document order
  ranked.sort_by(|a, b| b.version.cmp(&a.version));
  ranked.first().copied()
}

/// Line index the new block is spliced in before
pub fn insertion_point(doc: &ChangelogDocument, header_end: usize, entries: &[EntryLine]) -> usize {
  match highest_entry(entries) {
    Some(entry) => entry.index,
    None => {
      let mut index = header_end;
      while index < doc.len() && is_blank(&doc.lines()[index]) {
        index += 1;
      }
      index
    }
  }
}

/// Insert a new entry for `version`
///
/// Returns the updated document and where the entry went. On
/// `HeaderNotFound` the caller still holds the untouched input.
pub fn insert_entry(
  doc: &ChangelogDocument,
  header_pattern: &Regex,
  version: &Version,
  date: &str,
  body: &str,
) -> Result<(ChangelogDocument, Insertion), ChangelogError> {
  let header_end = doc
    .find_header(header_pattern)
    .ok_or_else(|| ChangelogError::HeaderNotFound {
      pattern: header_pattern.as_str().to_string(),
    })?;
  debug!(header_end, "changelog header found");

  let entries = doc.find_entries(header_end);
  let index = insertion_point(doc, header_end, &entries);
  let highest = highest_entry(&entries);
  let above = highest.map(|e| e.version);
  debug!(
    entries = entries.len(),
    highest = ?above,
    highest_date = ?highest.map(|e| e.date.as_str()),
    index,
    "changelog insertion point"
  );

  let block = format_entry(version, date, body, doc.line_ending(header_end));
  let added = block.len();

  let mut updated = doc.clone();
  updated.splice(index, block, doc.line_ending(header_end));

  Ok((
    updated,
    Insertion {
      line: index,
      added,
      above,
    },
  ))
}
