//! Release command: version bump plus changelog entries for a release PR

use super::report::{OutputMode, present};
use crate::core::context::ScribeContext;
use crate::core::error::{ResultExt, ScribeResult};
use crate::release::{PullRequest, is_release_title, prepare_release};
use std::fs;
use std::path::{Path, PathBuf};

/// Inputs of the `apply` command
#[derive(Debug, Clone, Default)]
pub struct ApplyArgs {
  pub title: Option<String>,
  pub description_file: Option<PathBuf>,
  pub changes_file: Option<PathBuf>,
  pub diff_file: Option<PathBuf>,
  pub date: Option<String>,
  pub mode: OutputMode,
}

/// Run the apply command
pub fn run_apply(ctx: &ScribeContext, args: ApplyArgs) -> ScribeResult<()> {
  let config = ctx.require_config()?;
  let title = args.title.unwrap_or_default();

  if !is_release_title(&title, &config.release_marker) {
    if args.mode.json {
      println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
          "release": false,
          "title": title,
        }))?
      );
    } else {
      println!(
        "⏭️  Not a release pull request (title must start with '{}'); nothing to do",
        config.release_marker
      );
    }
    return Ok(());
  }

  let diff = read_optional(ctx, args.diff_file.as_deref())?.unwrap_or_default();
  let pr = PullRequest {
    title,
    description: read_optional(ctx, args.description_file.as_deref())?.unwrap_or_default(),
    changes: read_optional(ctx, args.changes_file.as_deref())?,
    changed_files: changed_files(&diff),
    diff,
  };

  let date = ctx.release_date(args.date.as_deref())?;
  let prepared = prepare_release(ctx, &config, &pr, &date)?;

  present(&prepared, args.mode)
}

/// Read an input file when one was given
///
/// A missing `--changes-file` counts as "no notes" so CI can pass the flag
/// unconditionally.
fn read_optional(ctx: &ScribeContext, path: Option<&Path>) -> ScribeResult<Option<String>> {
  let Some(path) = path else {
    return Ok(None);
  };
  let abs = ctx.resolve(path);
  if !abs.exists() {
    tracing::debug!(path = %abs.display(), "optional input not present");
    return Ok(None);
  }
  let text = fs::read_to_string(&abs).with_context(|| format!("Failed to read {}", abs.display()))?;
  Ok(Some(text))
}

/// Paths touched by a unified diff (`+++ b/<path>` lines)
fn changed_files(diff: &str) -> Vec<String> {
  diff
    .lines()
    .filter_map(|line| line.strip_prefix("+++ "))
    .filter(|path| *path != "/dev/null")
    .map(|path| path.strip_prefix("b/").unwrap_or(path).to_string())
    .collect()
}
