//! Init command: write a starter scribe.toml

use crate::core::config::ScribeConfig;
use crate::core::context::ScribeContext;
use crate::core::error::{ScribeError, ScribeResult};
use std::path::PathBuf;

/// Run the init command
pub fn run_init(ctx: &ScribeContext, source: PathBuf, changelog: PathBuf, force: bool) -> ScribeResult<()> {
  if let Some(existing) = ScribeConfig::find_config_path(&ctx.root)
    && !force
  {
    return Err(ScribeError::with_help(
      format!("Configuration already exists: {}", existing.display()),
      "Use --force to overwrite it",
    ));
  }

  let config = ScribeConfig::starter(source, changelog);
  config.save(&ctx.root)?;

  println!("✅ Created scribe.toml");
  println!();
  println!("Next steps:");
  println!("  1. Check the version patterns against your source file");
  println!("  2. Adjust header_pattern to match your changelog's heading");
  println!("  3. Preview a release: release-scribe apply --title \"[release] ...\"");

  Ok(())
}
