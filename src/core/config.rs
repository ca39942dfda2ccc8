use crate::core::error::{ConfigError, ResultExt, ScribeError, ScribeResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Placeholder substituted with the new version in replace templates
pub const NEW_VERSION_PLACEHOLDER: &str = "{{new_version}}";

/// Configuration for release-scribe
/// Searched in order: scribe.toml, .scribe.toml, .config/scribe.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScribeConfig {
  /// Title prefix that marks a pull request as a release (case-insensitive)
  #[serde(default = "default_release_marker")]
  pub release_marker: String,

  /// Diff text is cut to this many characters before entry generation
  #[serde(default = "default_max_diff_chars")]
  pub max_diff_chars: usize,

  /// Target files, processed in order
  #[serde(default)]
  pub files: Vec<FileConfig>,
}

fn default_release_marker() -> String {
  "[release]".to_string()
}

fn default_max_diff_chars() -> usize {
  4000
}

fn default_true() -> bool {
  true
}

/// Kind of target file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
  /// Carries the version declaration; rewritten with search/replace patterns
  #[serde(alias = "php")]
  Source,
  /// Receives a new dated entry below its header
  Changelog,
}

/// One search/replace rule for a source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
  /// Regex to search for
  pub search: String,
  /// Replacement template; `$` is literal, groups are `\1` or `\g<name>`
  pub replace: String,
}

/// A target file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
  pub path: PathBuf,

  #[serde(rename = "type")]
  pub kind: FileKind,

  /// Search/replace rules (source files)
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub patterns: Vec<Pattern>,

  /// Regex matched against two adjacent lines joined together (changelog files)
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub header_pattern: Option<String>,

  /// Changelog files with this set to false are left alone
  #[serde(default = "default_true")]
  pub needs_description: bool,
}

impl FileConfig {
  /// Compiled header pattern of a changelog file
  pub fn header_regex(&self) -> ScribeResult<Regex> {
    let pattern = self.header_pattern.as_deref().ok_or_else(|| {
      ScribeError::Config(ConfigError::MissingField {
        field: format!("header_pattern for {}", self.path.display()),
      })
    })?;
    compile(pattern)
  }

  /// Validate the file entry
  pub fn validate(&self) -> ScribeResult<()> {
    match self.kind {
      FileKind::Source => {
        for pattern in &self.patterns {
          compile(&pattern.search)?;
          if !pattern.replace.contains(NEW_VERSION_PLACEHOLDER) {
            return Err(ScribeError::with_help(
              format!(
                "Replace template '{}' for {} never inserts the new version",
                pattern.replace,
                self.path.display()
              ),
              format!("Use {} in the replace template", NEW_VERSION_PLACEHOLDER),
            ));
          }
        }
      }
      FileKind::Changelog => {
        self.header_regex()?;
      }
    }
    Ok(())
  }
}

fn compile(pattern: &str) -> ScribeResult<Regex> {
  Regex::new(pattern).map_err(|e| {
    ScribeError::Config(ConfigError::InvalidPattern {
      pattern: pattern.to_string(),
      reason: e.to_string(),
    })
  })
}

impl ScribeConfig {
  /// Find config file in search order: scribe.toml, .scribe.toml, .config/scribe.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("scribe.toml"),
      path.join(".scribe.toml"),
      path.join(".config").join("scribe.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config, from `explicit` when given, else by searching `root`
  pub fn load(root: &Path, explicit: Option<&Path>) -> ScribeResult<Self> {
    let config_path = match explicit {
      Some(path) => root.join(path),
      None => Self::find_config_path(root).ok_or_else(|| {
        ScribeError::Config(ConfigError::NotFound {
          search_root: root.to_path_buf(),
        })
      })?,
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = Self::from_toml(&content).with_context(|| format!("Invalid config in {}", config_path.display()))?;

    Ok(config)
  }

  /// Parse and validate TOML text
  pub fn from_toml(content: &str) -> ScribeResult<Self> {
    let config: ScribeConfig = toml_edit::de::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Save config to scribe.toml (default location)
  pub fn save(&self, path: &Path) -> ScribeResult<()> {
    let config_path = path.join("scribe.toml");
    let content = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(())
  }

  /// Validate the whole configuration
  pub fn validate(&self) -> ScribeResult<()> {
    if self.files.is_empty() {
      return Err(ScribeError::with_help(
        "No target files configured",
        "Add at least one [[files]] entry to scribe.toml",
      ));
    }

    if self.release_marker.trim().is_empty() {
      return Err(ScribeError::Config(ConfigError::MissingField {
        field: "release_marker".to_string(),
      }));
    }

    self.source_file()?;

    for file in &self.files {
      file.validate()?;
    }
    Ok(())
  }

  /// The file the current version is read from (the first source file)
  pub fn source_file(&self) -> ScribeResult<&FileConfig> {
    self
      .files
      .iter()
      .find(|f| f.kind == FileKind::Source)
      .ok_or(ScribeError::Config(ConfigError::NoSourceFile))
  }

  /// Starter configuration written by `init`
  pub fn starter(source: PathBuf, changelog: PathBuf) -> Self {
    Self {
      release_marker: default_release_marker(),
      max_diff_chars: default_max_diff_chars(),
      files: vec![
        FileConfig {
          path: source,
          kind: FileKind::Source,
          patterns: vec![
            Pattern {
              search: r"Version:(\s+)\d+\.\d+\.\d+".to_string(),
              replace: format!(r"Version:\1{}", NEW_VERSION_PLACEHOLDER),
            },
            Pattern {
              search: r#"(define\(\s*['"]\w*VERSION['"]\s*,\s*['"])\d+\.\d+\.\d+"#.to_string(),
              replace: format!(r"\1{}", NEW_VERSION_PLACEHOLDER),
            },
          ],
          header_pattern: None,
          needs_description: true,
        },
        FileConfig {
          path: changelog,
          kind: FileKind::Changelog,
          patterns: Vec::new(),
          header_pattern: Some(r"Changelog\r?\n=+".to_string()),
          needs_description: true,
        },
      ],
    }
  }
}
