//! Changelog command: add one entry to a single changelog file

use super::report::{OutputMode, present};
use crate::core::config::FileKind;
use crate::core::context::ScribeContext;
use crate::core::error::{ResultExt, ScribeError, ScribeResult};
use crate::release::{current_version, prepare_changelog_entry};
use crate::version::Version;
use regex::Regex;
use std::fs;
use std::path::PathBuf;

/// Inputs of the `changelog` command
#[derive(Debug, Clone, Default)]
pub struct ChangelogArgs {
  pub file: PathBuf,
  /// Falls back to the matching `[[files]]` entry in the config
  pub header_pattern: Option<String>,
  /// Falls back to the next version of the configured source file
  pub version: Option<String>,
  pub date: Option<String>,
  pub body: Option<String>,
  pub body_file: Option<PathBuf>,
  pub mode: OutputMode,
}

/// Run the changelog command
pub fn run_changelog(ctx: &ScribeContext, args: ChangelogArgs) -> ScribeResult<()> {
  let header = match &args.header_pattern {
    Some(pattern) => Regex::new(pattern)?,
    None => configured_header(ctx, &args.file)?,
  };

  let version = match &args.version {
    Some(v) => Version::parse(v)?,
    None => {
      let config = ctx.require_config()?;
      current_version(ctx, &config)?.increment_patch()?
    }
  };

  let body = match (&args.body, &args.body_file) {
    (Some(body), _) => body.clone(),
    (None, Some(path)) => {
      let abs = ctx.resolve(path);
      fs::read_to_string(&abs).with_context(|| format!("Failed to read {}", abs.display()))?
    }
    (None, None) => {
      return Err(ScribeError::with_help(
        "No entry body given",
        "Pass the entry text with --body or --body-file",
      ));
    }
  };

  let date = ctx.release_date(args.date.as_deref())?;
  let prepared = prepare_changelog_entry(ctx, &args.file, &header, &version, &date, body.trim_end())?;

  present(&prepared, args.mode)
}

/// Header pattern of the config entry for `file`
fn configured_header(ctx: &ScribeContext, file: &std::path::Path) -> ScribeResult<Regex> {
  let config = ctx.require_config().context("No --header-pattern given and no config to take it from")?;
  let entry = config
    .files
    .iter()
    .find(|f| f.kind == FileKind::Changelog && f.path.as_path() == file)
    .ok_or_else(|| {
      ScribeError::with_help(
        format!("{} is not a configured changelog", file.display()),
        "Pass --header-pattern or add the file to scribe.toml",
      )
    })?;
  entry.header_regex()
}
