//! Release orchestration: read targets, plan edits, write them back
//!
//! Version derivation failures abort the run before any file is touched.
//! Everything that goes wrong with a single target file afterwards (missing
//! changelog header, unreadable file, failed write) only skips that file.

use super::entry_text::{ChangeNotes, ChecklistItems, EntryRequest, ResolvedEntry, resolve_entry, truncate_diff};
use super::substitute::substitute_version;
use super::write::write_atomic;
use crate::changelog::{ChangelogDocument, insert_entry};
use crate::core::config::{FileConfig, FileKind, ScribeConfig};
use crate::core::context::ScribeContext;
use crate::core::error::{ChangelogError, ResultExt, ScribeResult};
use crate::core::plan::{Operation, OperationType, Plan};
use crate::version::{Version, extract_version};
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Pull request inputs, already read from wherever CI put them
#[derive(Debug, Clone, Default)]
pub struct PullRequest {
  pub title: String,
  pub description: String,
  /// Pre-written change notes; preferred over everything else when non-blank
  pub changes: Option<String>,
  pub changed_files: Vec<String>,
  pub diff: String,
}

/// New contents for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
  /// Absolute path
  pub path: PathBuf,
  /// Path as configured, for output
  pub display: String,
  pub original: String,
  pub updated: String,
}

/// A computed plan plus the contents it would write
#[derive(Debug, Clone)]
pub struct PreparedRelease {
  pub plan: Plan,
  pub changes: Vec<FileChange>,
}

/// Outcome of writing prepared changes
#[derive(Debug, Default)]
pub struct WriteReport {
  pub written: Vec<String>,
  /// (path, reason)
  pub failed: Vec<(String, String)>,
}

/// Files read so far, with any staged edits layered on top
///
/// Two config entries may point at the same file; the second one sees the
/// first one's edits and the file is still written once.
struct Staging<'a> {
  ctx: &'a ScribeContext,
  changes: Vec<FileChange>,
}

impl<'a> Staging<'a> {
  fn new(ctx: &'a ScribeContext) -> Self {
    Self {
      ctx,
      changes: Vec::new(),
    }
  }

  fn read(&self, rel: &Path) -> io::Result<String> {
    let abs = self.ctx.resolve(rel);
    match self.changes.iter().find(|c| c.path == abs) {
      Some(change) => Ok(change.updated.clone()),
      None => fs::read_to_string(abs),
    }
  }

  fn stage(&mut self, rel: &Path, before: String, after: String) {
    let abs = self.ctx.resolve(rel);
    match self.changes.iter_mut().find(|c| c.path == abs) {
      Some(change) => change.updated = after,
      None => self.changes.push(FileChange {
        path: abs,
        display: rel.display().to_string(),
        original: before,
        updated: after,
      }),
    }
  }
}

/// Read the current version from the configured source file
pub fn current_version(ctx: &ScribeContext, config: &ScribeConfig) -> ScribeResult<Version> {
  let source = config.source_file()?;
  let path = ctx.resolve(&source.path);
  let location = source.path.display().to_string();

  let text =
    fs::read_to_string(&path).with_context(|| format!("Failed to read version source {}", path.display()))?;
  let found = extract_version(&text, &location)?;
  Ok(Version::parse(found)?)
}

/// Choose the changelog body for a pull request
pub fn entry_for(config: &ScribeConfig, pr: &PullRequest) -> ResolvedEntry {
  let request = EntryRequest {
    title: &pr.title,
    description: &pr.description,
    changed_files: &pr.changed_files,
    diff: truncate_diff(&pr.diff, config.max_diff_chars),
  };
  let notes = ChangeNotes(pr.changes.clone());
  resolve_entry(&[&notes, &ChecklistItems], &request, &config.release_marker)
}

/// Compute every edit for a release without writing anything
pub fn prepare_release(
  ctx: &ScribeContext,
  config: &ScribeConfig,
  pr: &PullRequest,
  date: &str,
) -> ScribeResult<PreparedRelease> {
  let current = current_version(ctx, config)?;
  let next = current.increment_patch()?;
  debug!(%current, %next, "version derived");

  let entry = entry_for(config, pr);
  debug!(source = entry.source, "changelog entry resolved");

  let mut plan = Plan::new(
    OperationType::Release,
    Some(current.to_string()),
    next.to_string(),
    date,
    entry.body.clone(),
  );
  let mut staging = Staging::new(ctx);

  for file in &config.files {
    let operation = plan_file(&mut staging, file, &current, &next, date, &entry.body);
    if let Operation::Skip { path, reason } = &operation {
      warn!(path = %path, reason = %reason, "skipping file");
    }
    plan.add_operation(operation);
  }

  Ok(PreparedRelease {
    plan,
    changes: staging.changes,
  })
}

fn plan_file(
  staging: &mut Staging<'_>,
  file: &FileConfig,
  current: &Version,
  next: &Version,
  date: &str,
  body: &str,
) -> Operation {
  let label = file.path.display().to_string();
  let skip = |reason: String| Operation::Skip {
    path: label.clone(),
    reason,
  };

  if file.kind == FileKind::Changelog && !file.needs_description {
    return skip("needs_description is false".to_string());
  }

  let content = match staging.read(&file.path) {
    Ok(content) => content,
    Err(e) => return skip(format!("could not read file: {}", e)),
  };

  match file.kind {
    FileKind::Source => match substitute_version(&content, &file.patterns, next) {
      Ok(result) => {
        for search in &result.unmatched {
          warn!(path = %label, pattern = %search, "version pattern matched nothing");
        }
        if result.replacements == 0 {
          return skip("no version pattern matched".to_string());
        }
        staging.stage(&file.path, content, result.content);
        Operation::BumpVersion {
          path: label.clone(),
          from: current.to_string(),
          to: next.to_string(),
          replacements: result.replacements,
        }
      }
      Err(e) => skip(e.to_string()),
    },
    FileKind::Changelog => {
      let header = match file.header_regex() {
        Ok(header) => header,
        Err(e) => return skip(e.to_string()),
      };
      let doc = ChangelogDocument::parse(&content);
      match insert_entry(&doc, &header, next, date, body) {
        Ok((updated, insertion)) => {
          staging.stage(&file.path, content, updated.to_text());
          Operation::InsertEntry {
            path: label.clone(),
            version: next.to_string(),
            date: date.to_string(),
            line: insertion.line,
            above: insertion.above.map(|v| v.to_string()),
          }
        }
        Err(e @ ChangelogError::HeaderNotFound { .. }) => skip(e.to_string()),
      }
    }
  }
}

/// Compute a single changelog insertion (the `changelog` command)
///
/// With only one file involved a missing header is an error, not a skip.
pub fn prepare_changelog_entry(
  ctx: &ScribeContext,
  path: &Path,
  header: &Regex,
  version: &Version,
  date: &str,
  body: &str,
) -> ScribeResult<PreparedRelease> {
  let label = path.display().to_string();
  let abs = ctx.resolve(path);
  let content = fs::read_to_string(&abs).with_context(|| format!("Failed to read {}", abs.display()))?;

  let doc = ChangelogDocument::parse(&content);
  let (updated, insertion) = insert_entry(&doc, header, version, date, body)?;

  let mut plan = Plan::new(OperationType::Changelog, None, version.to_string(), date, body);
  plan.add_operation(Operation::InsertEntry {
    path: label.clone(),
    version: version.to_string(),
    date: date.to_string(),
    line: insertion.line,
    above: insertion.above.map(|v| v.to_string()),
  });

  Ok(PreparedRelease {
    plan,
    changes: vec![FileChange {
      path: abs,
      display: label,
      original: content,
      updated: updated.to_text(),
    }],
  })
}

/// Write every change, continuing past individual failures
pub fn apply_changes(changes: &[FileChange]) -> WriteReport {
  let mut report = WriteReport::default();
  for change in changes {
    match write_atomic(&change.path, &change.updated) {
      Ok(()) => {
        debug!(path = %change.display, "file written");
        report.written.push(change.display.clone());
      }
      Err(e) => {
        warn!(path = %change.display, error = %e, "write failed");
        report.failed.push((change.display.clone(), e.to_string()));
      }
    }
  }
  report
}
