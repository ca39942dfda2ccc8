//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const PLUGIN_PHP: &str = r#"<?php
/**
 * Plugin Name: Widgets
 * Version:     1.0.2
 */

define( 'WIDGETS_VERSION', '1.0.2' );
"#;

pub const CHANGELOG_MD: &str = "Changelog\n=========\n\n1.0.2 (2024-01-01)\n- Fixed widget alignment\n\n1.0.1 (2023-12-01)\n- Initial fixes\n";

pub const README_TXT: &str = "=== Widgets ===\nStable tag: 1.0.2\n\n== Changelog ==\n\n= 1.0.2 =\n* Fixed widget alignment\n";

pub const CONFIG_TOML: &str = r#"
[[files]]
path = "widgets.php"
type = "php"

[[files.patterns]]
search = "Version:(\\s+)\\d+\\.\\d+\\.\\d+"
replace = "Version:\\1{{new_version}}"

[[files.patterns]]
search = "'WIDGETS_VERSION', '\\d+\\.\\d+\\.\\d+'"
replace = "'WIDGETS_VERSION', '{{new_version}}'"

[[files]]
path = "CHANGELOG.md"
type = "changelog"
header_pattern = "Changelog\\n========="
"#;

/// A throwaway project directory holding a plugin, its changelog and a config
pub struct TestWorkspace {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestWorkspace {
  /// Empty workspace
  pub fn empty() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// Workspace with widgets.php, CHANGELOG.md and scribe.toml
  pub fn new() -> Result<Self> {
    let workspace = Self::empty()?;
    workspace.write_file("widgets.php", PLUGIN_PHP)?;
    workspace.write_file("CHANGELOG.md", CHANGELOG_MD)?;
    workspace.write_file("scribe.toml", CONFIG_TOML)?;
    Ok(workspace)
  }

  /// Write a file, creating parent directories
  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let file_path = self.path.join(path);
    if let Some(parent) = file_path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&file_path, content).with_context(|| format!("Failed to write {}", path))?;
    Ok(())
  }

  /// Append a `[[files]]` entry (or any TOML) to scribe.toml
  pub fn append_config(&self, toml: &str) -> Result<()> {
    let mut config = self.read_file("scribe.toml")?;
    config.push_str(toml);
    self.write_file("scribe.toml", &config)
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }
}

/// Run release-scribe and return its output whatever the exit status
pub fn run_scribe_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let scribe_bin = env!("CARGO_BIN_EXE_release-scribe");

  Command::new(scribe_bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("PR_TITLE")
    .env_remove("RUST_LOG")
    .output()
    .context("Failed to run release-scribe")
}

/// Run release-scribe, failing on a non-zero exit
pub fn run_scribe(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_scribe_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "release-scribe command failed: release-scribe {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

/// Stdout as a string
pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}

/// Stderr as a string
pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).to_string()
}
