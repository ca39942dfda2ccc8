//! Version command: show the current and next release version

use crate::core::context::ScribeContext;
use crate::core::error::ScribeResult;
use crate::release::current_version;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct VersionReport {
  source: String,
  current: String,
  next: String,
}

/// Run the version command
pub fn run_version(ctx: &ScribeContext, json: bool) -> ScribeResult<()> {
  let config = ctx.require_config()?;
  let current = current_version(ctx, &config)?;
  let next = current.increment_patch()?;

  let report = VersionReport {
    source: config.source_file()?.path.display().to_string(),
    current: current.to_string(),
    next: next.to_string(),
  };

  if json {
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    println!("📦 {}", report.source);
    println!("   Current version: {}", report.current);
    println!("   Next version:    {}", report.next);
  }

  Ok(())
}
