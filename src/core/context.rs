//! Explicit run context - built once in main.rs, passed to every command
//!
//! Process-wide inputs (working directory, clock, config location) are
//! resolved here so that nothing below the commands reads the environment
//! or the system clock on its own.

use crate::core::config::ScribeConfig;
use crate::core::error::{ScribeError, ScribeResult};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Date format of changelog entries
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Shared inputs for one invocation
#[derive(Debug, Clone)]
pub struct ScribeContext {
  /// Directory target paths are resolved against
  pub root: PathBuf,

  /// Config file given with `--config`, searched for otherwise
  pub config_path: Option<PathBuf>,

  /// Today's date (`YYYY-MM-DD`) from the local clock
  pub today: String,
}

impl ScribeContext {
  pub fn new(root: PathBuf, config_path: Option<PathBuf>, today: String) -> Self {
    Self {
      root,
      config_path,
      today,
    }
  }

  /// Build from the current directory and local clock
  pub fn from_process(config_path: Option<PathBuf>) -> ScribeResult<Self> {
    let root = std::env::current_dir()
      .map_err(|e| ScribeError::message(format!("Failed to get current directory: {}", e)))?;
    let today = chrono::Local::now().date_naive().format(DATE_FORMAT).to_string();
    Ok(Self::new(root, config_path, today))
  }

  /// Load and validate the configuration
  ///
  /// Not every command needs one (`init`, `changelog`), so it is loaded on demand.
  pub fn require_config(&self) -> ScribeResult<ScribeConfig> {
    ScribeConfig::load(&self.root, self.config_path.as_deref())
  }

  /// Resolve a configured or user-supplied path against the root
  pub fn resolve(&self, path: &Path) -> PathBuf {
    self.root.join(path)
  }

  /// `--date` override, or today
  pub fn release_date(&self, date: Option<&str>) -> ScribeResult<String> {
    match date {
      Some(d) => normalize_date(d),
      None => Ok(self.today.clone()),
    }
  }
}

/// Validate a `YYYY-MM-DD` date and return it zero-padded
pub fn normalize_date(date: &str) -> ScribeResult<String> {
  NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
    .map(|d| d.format(DATE_FORMAT).to_string())
    .map_err(|e| ScribeError::with_help(format!("Invalid date '{}': {}", date, e), "Dates use the YYYY-MM-DD form"))
}
