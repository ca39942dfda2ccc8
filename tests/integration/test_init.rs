//! Tests for the `init` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_init_creates_config() -> Result<()> {
  let workspace = TestWorkspace::empty()?;

  run_scribe(&workspace.path, &["init", "--source", "widgets.php"])?;

  assert!(workspace.file_exists("scribe.toml"));
  let config = workspace.read_file("scribe.toml")?;
  assert!(config.contains("widgets.php"));
  assert!(config.contains("CHANGELOG.md"));
  assert!(config.contains("{{new_version}}"));

  Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let output = run_scribe_raw(&workspace.path, &["init"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("--force"));
  assert_eq!(workspace.read_file("scribe.toml")?, CONFIG_TOML);

  run_scribe(&workspace.path, &["init", "--force"])?;
  assert_ne!(workspace.read_file("scribe.toml")?, CONFIG_TOML);

  Ok(())
}

#[test]
fn test_starter_config_drives_a_release() -> Result<()> {
  let workspace = TestWorkspace::empty()?;
  workspace.write_file("widgets.php", PLUGIN_PHP)?;
  workspace.write_file("CHANGELOG.md", CHANGELOG_MD)?;

  run_scribe(&workspace.path, &["init", "--source", "widgets.php"])?;
  run_scribe(
    &workspace.path,
    &["apply", "--title", "[release] Starter", "--date", "2024-02-01", "--apply"],
  )?;

  let plugin = workspace.read_file("widgets.php")?;
  assert!(plugin.contains(" * Version:     1.0.3\n"));
  assert!(plugin.contains("define( 'WIDGETS_VERSION', '1.0.3' );"));
  assert!(
    workspace
      .read_file("CHANGELOG.md")?
      .starts_with("Changelog\n=========\n\n1.0.3 (2024-02-01)\n- Starter\n\n1.0.2")
  );

  Ok(())
}
