//! Line-level view of a hand-maintained changelog
//!
//! The document is kept as the exact lines read from disk, each with its own
//! terminator (`\n`, `\r\n`, or none for an unterminated last line), so that
//! joining them reproduces the input byte-for-byte.

use crate::version::Version;
use regex::Regex;
use std::sync::LazyLock;

/// `X.Y.Z (YYYY-MM-DD)` at the start of a line, trailing whitespace allowed
static INTRODUCER: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^([0-9]+\.[0-9]+\.[0-9]+) \(([0-9]{4}-[0-9]{2}-[0-9]{2})\)\s*$").expect("static regex")
});

/// Line terminator used when new lines are written into a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
  Lf,
  CrLf,
}

impl LineEnding {
  pub fn as_str(self) -> &'static str {
    match self {
      LineEnding::Lf => "\n",
      LineEnding::CrLf => "\r\n",
    }
  }

  /// Ending of `line`, defaulting to `\n` when it has none
  pub fn of(line: &str) -> Self {
    if line.ends_with("\r\n") {
      LineEnding::CrLf
    } else {
      LineEnding::Lf
    }
  }
}

/// An existing version entry's introducer line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLine {
  /// Index of the introducer in the document
  pub index: usize,
  pub version: Version,
  pub date: String,
}

/// Parse an entry introducer, returning its version and date
///
/// Lines that only look version-like (two components, missing date, numbers
/// too large for a `u64`) are ordinary body text.
pub fn parse_introducer(line: &str) -> Option<(Version, &str)> {
  let caps = INTRODUCER.captures(line)?;
  let version = Version::parse(caps.get(1)?.as_str()).ok()?;
  Some((version, caps.get(2)?.as_str()))
}

/// Whitespace-only (terminator included)
pub fn is_blank(line: &str) -> bool {
  line.trim().is_empty()
}

/// A changelog file as an ordered sequence of lines
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangelogDocument {
  lines: Vec<String>,
}

impl ChangelogDocument {
  /// Split text into lines, keeping every terminator
  pub fn parse(text: &str) -> Self {
    Self {
      lines: text.split_inclusive('\n').map(String::from).collect(),
    }
  }

  #[allow(dead_code)] // Used in tests to build documents line by line
  pub fn from_lines<I, S>(lines: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      lines: lines.into_iter().map(Into::into).collect(),
    }
  }

  pub fn lines(&self) -> &[String] {
    &self.lines
  }

  #[allow(dead_code)]
  pub fn into_lines(self) -> Vec<String> {
    self.lines
  }

  pub fn len(&self) -> usize {
    self.lines.len()
  }

  #[allow(dead_code)]
  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  /// Join the lines back into file contents
  pub fn to_text(&self) -> String {
    self.lines.concat()
  }

  /// Locate the two-line header marker
  ///
  /// Each pair of adjacent lines is joined verbatim (terminators included) and
  /// tested against `pattern`. The first matching pair wins; the returned index
  /// is the first line after the pair.
  pub fn find_header(&self, pattern: &Regex) -> Option<usize> {
    self
      .lines
      .windows(2)
      .position(|pair| pattern.is_match(&format!("{}{}", pair[0], pair[1])))
      .map(|i| i + 2)
  }

  /// Every entry introducer from `from` to end-of-file, in document order
  pub fn find_entries(&self, from: usize) -> Vec<EntryLine> {
    self
      .lines
      .iter()
      .enumerate()
      .skip(from)
      .filter_map(|(index, line)| {
        parse_introducer(line).map(|(version, date)| EntryLine {
          index,
          version,
          date: date.to_string(),
        })
      })
      .collect()
  }

  /// Terminator convention for lines added below a header ending at `header_end`
  ///
  /// Taken from the underline line, the last line of the header pair.
  pub fn line_ending(&self, header_end: usize) -> LineEnding {
    header_end
      .checked_sub(1)
      .and_then(|i| self.lines.get(i))
      .map(|line| LineEnding::of(line))
      .unwrap_or(LineEnding::Lf)
  }

  /// Insert `block` before line `index`
  ///
  /// A preceding line without a terminator (the old last line) gets one first
  /// so the block starts on its own line.
  pub(crate) fn splice(&mut self, index: usize, block: Vec<String>, ending: LineEnding) {
    if let Some(prev) = index.checked_sub(1).and_then(|i| self.lines.get_mut(i))
      && !prev.ends_with('\n')
    {
      prev.push_str(ending.as_str());
    }
    self.lines.splice(index..index, block);
  }
}
