//! Tests for the `apply` command

use crate::helpers::*;
use anyhow::Result;

const RELEASED_CHANGELOG: &str = "Changelog\n=========\n\n1.0.3 (2024-02-01)\n- Improve widget caching\n\n1.0.2 (2024-01-01)\n- Fixed widget alignment\n\n1.0.1 (2023-12-01)\n- Initial fixes\n";

#[test]
fn test_non_release_title_does_nothing() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let output = run_scribe(
    &workspace.path,
    &["apply", "--title", "Improve widget caching", "--apply", "--date", "2024-02-01"],
  )?;

  assert!(stdout(&output).contains("Not a release pull request"));
  assert_eq!(workspace.read_file("widgets.php")?, PLUGIN_PHP);
  assert_eq!(workspace.read_file("CHANGELOG.md")?, CHANGELOG_MD);

  Ok(())
}

#[test]
fn test_marker_must_start_the_title() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  run_scribe(
    &workspace.path,
    &["apply", "--title", "Improve caching [release]", "--apply"],
  )?;
  run_scribe(&workspace.path, &["apply", "--apply"])?;

  assert_eq!(workspace.read_file("CHANGELOG.md")?, CHANGELOG_MD);
  Ok(())
}

#[test]
fn test_dry_run_leaves_files_untouched() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let output = run_scribe(
    &workspace.path,
    &["apply", "--title", "[release] Improve widget caching", "--date", "2024-02-01"],
  )?;
  let out = stdout(&output);

  assert!(out.contains("1.0.2 → 1.0.3"), "stdout: {}", out);
  assert!(out.contains("+1.0.3 (2024-02-01)"), "stdout: {}", out);
  assert!(out.contains("+ * Version:     1.0.3"), "stdout: {}", out);
  assert!(out.contains("Dry-run"));
  assert_eq!(workspace.read_file("widgets.php")?, PLUGIN_PHP);
  assert_eq!(workspace.read_file("CHANGELOG.md")?, CHANGELOG_MD);

  Ok(())
}

#[test]
fn test_apply_updates_source_and_changelog() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let output = run_scribe(
    &workspace.path,
    &["apply", "--title", "[release] Improve widget caching", "--date", "2024-02-01", "--apply"],
  )?;

  let plugin = workspace.read_file("widgets.php")?;
  assert!(plugin.contains(" * Version:     1.0.3\n"));
  assert!(plugin.contains("define( 'WIDGETS_VERSION', '1.0.3' );"));
  assert!(!plugin.contains("1.0.2"));

  assert_eq!(workspace.read_file("CHANGELOG.md")?, RELEASED_CHANGELOG);
  assert!(stdout(&output).contains("2 file(s) updated, 0 skipped, 0 failed"));

  Ok(())
}

#[test]
fn test_php_variables_in_templates_survive() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_file("settings.php", "<?php\n$plugin_version = '1.0.2';\n")?;
  workspace.append_config(
    r#"
[[files]]
path = "settings.php"
type = "php"

[[files.patterns]]
search = "\\$plugin_version = '\\d+\\.\\d+\\.\\d+';"
replace = "$plugin_version = '{{new_version}}';"
"#,
  )?;

  run_scribe(
    &workspace.path,
    &["apply", "--title", "[release] Settings", "--date", "2024-02-01", "--apply"],
  )?;

  assert_eq!(workspace.read_file("settings.php")?, "<?php\n$plugin_version = '1.0.3';\n");

  Ok(())
}

#[test]
fn test_title_marker_is_case_insensitive() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  run_scribe(
    &workspace.path,
    &["apply", "--title", "[RELEASE] Improve widget caching", "--date", "2024-02-01", "--apply"],
  )?;

  assert_eq!(workspace.read_file("CHANGELOG.md")?, RELEASED_CHANGELOG);
  Ok(())
}

#[test]
fn test_title_from_environment() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let output = std::process::Command::new(env!("CARGO_BIN_EXE_release-scribe"))
    .current_dir(&workspace.path)
    .args(["apply", "--date", "2024-02-01", "--apply"])
    .env("PR_TITLE", "[release] Improve widget caching")
    .output()?;

  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert_eq!(workspace.read_file("CHANGELOG.md")?, RELEASED_CHANGELOG);
  Ok(())
}

#[test]
fn test_change_notes_file_is_used_verbatim() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_file("pr_changes.txt", "- Added caching layer\n- Fixed typo in settings\n\n")?;

  run_scribe(
    &workspace.path,
    &[
      "apply",
      "--title",
      "[release] Ignored title",
      "--changes-file",
      "pr_changes.txt",
      "--date",
      "2024-02-01",
      "--apply",
    ],
  )?;

  let changelog = workspace.read_file("CHANGELOG.md")?;
  assert!(changelog.starts_with(
    "Changelog\n=========\n\n1.0.3 (2024-02-01)\n- Added caching layer\n- Fixed typo in settings\n\n1.0.2 (2024-01-01)\n"
  ));
  assert!(!changelog.contains("Ignored title"));

  Ok(())
}

#[test]
fn test_description_checklist_feeds_entry() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_file(
    "description.md",
    "## Changes\n\n- [x] Cache widget queries\n- [ ] Redesign settings\n- [x] Fix RTL layout\n",
  )?;

  run_scribe(
    &workspace.path,
    &[
      "apply",
      "--title",
      "[release] Caching",
      "--description-file",
      "description.md",
      "--changes-file",
      "missing-notes.txt",
      "--date",
      "2024-02-01",
      "--apply",
    ],
  )?;

  let changelog = workspace.read_file("CHANGELOG.md")?;
  assert!(changelog.contains("1.0.3 (2024-02-01)\n- Cache widget queries\n- Fix RTL layout\n\n1.0.2"));

  Ok(())
}

#[test]
fn test_missing_header_skips_only_that_file() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_file("HISTORY.md", "Nothing that looks like a header\n")?;
  workspace.append_config(
    r#"
[[files]]
path = "HISTORY.md"
type = "changelog"
header_pattern = "History\\n-------"
"#,
  )?;

  let output = run_scribe(
    &workspace.path,
    &["apply", "--title", "[release] Improve widget caching", "--date", "2024-02-01", "--apply"],
  )?;
  let out = stdout(&output);

  assert_eq!(workspace.read_file("CHANGELOG.md")?, RELEASED_CHANGELOG);
  assert!(workspace.read_file("widgets.php")?.contains("1.0.3"));
  assert_eq!(workspace.read_file("HISTORY.md")?, "Nothing that looks like a header\n");
  assert!(out.contains("Skipped HISTORY.md"), "stdout: {}", out);
  assert!(out.contains("2 file(s) updated, 1 skipped, 0 failed"), "stdout: {}", out);

  Ok(())
}

#[test]
fn test_strict_mode_refuses_partial_update() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_file("HISTORY.md", "Nothing that looks like a header\n")?;
  workspace.append_config(
    r#"
[[files]]
path = "HISTORY.md"
type = "changelog"
header_pattern = "History\\n-------"
"#,
  )?;

  let output = run_scribe_raw(
    &workspace.path,
    &[
      "apply",
      "--title",
      "[release] Improve widget caching",
      "--date",
      "2024-02-01",
      "--apply",
      "--strict",
    ],
  )?;

  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("Release incomplete"));
  assert_eq!(workspace.read_file("CHANGELOG.md")?, CHANGELOG_MD);
  assert_eq!(workspace.read_file("widgets.php")?, PLUGIN_PHP);

  Ok(())
}

#[test]
fn test_needs_description_false_is_left_alone() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_file("readme.txt", README_TXT)?;
  workspace.append_config(
    r#"
[[files]]
path = "readme.txt"
type = "changelog"
header_pattern = "== Changelog ==\\n"
needs_description = false
"#,
  )?;

  let output = run_scribe(
    &workspace.path,
    &["apply", "--title", "[release] Improve widget caching", "--date", "2024-02-01", "--apply"],
  )?;

  assert_eq!(workspace.read_file("readme.txt")?, README_TXT);
  assert_eq!(workspace.read_file("CHANGELOG.md")?, RELEASED_CHANGELOG);
  assert!(stdout(&output).contains("Skipped readme.txt: needs_description is false"));

  Ok(())
}

#[test]
fn test_json_plan_output() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let output = run_scribe(
    &workspace.path,
    &["apply", "--title", "[release] Improve widget caching", "--date", "2024-02-01", "--json"],
  )?;

  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
  assert_eq!(json["applied"], false);
  assert_eq!(json["plan"]["metadata"]["current_version"], "1.0.2");
  assert_eq!(json["plan"]["metadata"]["next_version"], "1.0.3");
  assert_eq!(json["plan"]["metadata"]["date"], "2024-02-01");
  assert_eq!(json["plan"]["entry"], "- Improve widget caching");

  let operations = json["plan"]["operations"].as_array().expect("operations array");
  assert_eq!(operations.len(), 2);
  assert_eq!(operations[0]["type"], "bump_version");
  assert_eq!(operations[0]["replacements"], 2);
  assert_eq!(operations[1]["type"], "insert_entry");
  assert_eq!(operations[1]["line"], 3);
  assert_eq!(operations[1]["above"], "1.0.2");

  assert_eq!(json["outcomes"][0]["status"], "planned");
  assert_eq!(workspace.read_file("CHANGELOG.md")?, CHANGELOG_MD);

  Ok(())
}

#[test]
fn test_plan_id_is_stable_across_runs() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  let args = ["apply", "--title", "[release] Improve widget caching", "--date", "2024-02-01", "--json"];

  let first: serde_json::Value = serde_json::from_slice(&run_scribe(&workspace.path, &args)?.stdout)?;
  let second: serde_json::Value = serde_json::from_slice(&run_scribe(&workspace.path, &args)?.stdout)?;

  assert_eq!(first["plan"]["metadata"]["id"], second["plan"]["metadata"]["id"]);
  Ok(())
}

#[test]
fn test_version_not_found_is_fatal() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_file("widgets.php", "<?php\n// no version here\n")?;

  let output = run_scribe_raw(
    &workspace.path,
    &["apply", "--title", "[release] Improve widget caching", "--apply"],
  )?;

  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("Could not extract version from widgets.php"));
  assert_eq!(workspace.read_file("CHANGELOG.md")?, CHANGELOG_MD);

  Ok(())
}

#[test]
fn test_missing_config_is_user_error() -> Result<()> {
  let workspace = TestWorkspace::empty()?;

  let output = run_scribe_raw(&workspace.path, &["apply", "--title", "[release] x"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("release-scribe init"));
  Ok(())
}

#[test]
fn test_invalid_date_is_rejected() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let output = run_scribe_raw(
    &workspace.path,
    &["apply", "--title", "[release] x", "--date", "01/02/2024", "--apply"],
  )?;

  assert_eq!(output.status.code(), Some(1));
  assert_eq!(workspace.read_file("CHANGELOG.md")?, CHANGELOG_MD);
  Ok(())
}

#[test]
fn test_explicit_config_path() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  let config = workspace.read_file("scribe.toml")?;
  std::fs::remove_file(workspace.path.join("scribe.toml"))?;
  workspace.write_file("ci/release.toml", &config)?;

  run_scribe(
    &workspace.path,
    &[
      "--config",
      "ci/release.toml",
      "apply",
      "--title",
      "[release] Improve widget caching",
      "--date",
      "2024-02-01",
      "--apply",
    ],
  )?;

  assert_eq!(workspace.read_file("CHANGELOG.md")?, RELEASED_CHANGELOG);
  assert!(!workspace.file_exists("scribe.toml"));
  Ok(())
}
