//! Tests for the `changelog` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_inserts_entry_with_configured_header() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  run_scribe(
    &workspace.path,
    &[
      "changelog",
      "--file",
      "CHANGELOG.md",
      "--version",
      "1.1.0",
      "--date",
      "2024-03-01",
      "--body",
      "- Added export",
      "--apply",
    ],
  )?;

  assert_eq!(
    workspace.read_file("CHANGELOG.md")?,
    "Changelog\n=========\n\n1.1.0 (2024-03-01)\n- Added export\n\n1.0.2 (2024-01-01)\n- Fixed widget alignment\n\n1.0.1 (2023-12-01)\n- Initial fixes\n"
  );
  // Only the changelog is touched
  assert_eq!(workspace.read_file("widgets.php")?, PLUGIN_PHP);

  Ok(())
}

#[test]
fn test_new_entry_goes_above_highest_version() -> Result<()> {
  let workspace = TestWorkspace::empty()?;
  workspace.write_file(
    "CHANGES.md",
    "Changelog\n=========\n\n2.0.0 (2024-02-01)\n- b\n\n1.5.0 (2024-01-01)\n- a\n",
  )?;

  run_scribe(
    &workspace.path,
    &[
      "changelog",
      "--file",
      "CHANGES.md",
      "--header-pattern",
      r"Changelog\n=========",
      "--version",
      "2.0.1",
      "--date",
      "2024-03-01",
      "--body",
      "- c",
      "--apply",
    ],
  )?;

  assert_eq!(
    workspace.read_file("CHANGES.md")?,
    "Changelog\n=========\n\n2.0.1 (2024-03-01)\n- c\n\n2.0.0 (2024-02-01)\n- b\n\n1.5.0 (2024-01-01)\n- a\n"
  );
  Ok(())
}

#[test]
fn test_body_file_and_dry_run() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_file("entry.txt", "- From a file\n")?;

  let output = run_scribe(
    &workspace.path,
    &[
      "changelog",
      "--file",
      "CHANGELOG.md",
      "--version",
      "1.0.3",
      "--date",
      "2024-03-01",
      "--body-file",
      "entry.txt",
    ],
  )?;

  assert!(stdout(&output).contains("+- From a file"));
  assert_eq!(workspace.read_file("CHANGELOG.md")?, CHANGELOG_MD);
  Ok(())
}

#[test]
fn test_version_defaults_to_next_release() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  run_scribe(
    &workspace.path,
    &["changelog", "--file", "CHANGELOG.md", "--date", "2024-03-01", "--body", "- x", "--apply"],
  )?;

  assert!(workspace.read_file("CHANGELOG.md")?.contains("\n1.0.3 (2024-03-01)\n- x\n\n1.0.2"));
  Ok(())
}

#[test]
fn test_missing_header_is_an_error() -> Result<()> {
  let workspace = TestWorkspace::empty()?;
  workspace.write_file("CHANGES.md", "Release notes\n-------------\n")?;

  let output = run_scribe_raw(
    &workspace.path,
    &[
      "changelog",
      "--file",
      "CHANGES.md",
      "--header-pattern",
      r"Changelog\n=========",
      "--version",
      "1.0.0",
      "--body",
      "- x",
      "--apply",
    ],
  )?;

  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("Could not find header pattern"));
  assert_eq!(workspace.read_file("CHANGES.md")?, "Release notes\n-------------\n");
  Ok(())
}

#[test]
fn test_malformed_version_is_rejected() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let output = run_scribe_raw(
    &workspace.path,
    &["changelog", "--file", "CHANGELOG.md", "--version", "1.0", "--body", "- x"],
  )?;

  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("Malformed version '1.0'"));
  Ok(())
}

#[test]
fn test_body_is_required() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let output = run_scribe_raw(&workspace.path, &["changelog", "--file", "CHANGELOG.md", "--version", "1.0.3"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("--body"));
  Ok(())
}
