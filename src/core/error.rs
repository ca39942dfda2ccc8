//! Error types for release-scribe with contextual messages and exit codes
//!
//! Every failure the tool can report is categorized so that `main` can pick an
//! exit code and print a help line. Errors local to one target file (missing
//! changelog header, I/O) are turned into per-file outcomes by the release
//! runner instead of being propagated.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for release-scribe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing files)
  User = 1,
  /// System error (I/O)
  System = 2,
  /// Validation failure (version not found, strict mode skips)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for release-scribe
#[derive(Debug)]
pub enum ScribeError {
  /// Configuration errors
  Config(ConfigError),

  /// Version parsing and extraction errors
  Version(VersionError),

  /// Changelog document errors
  Changelog(ChangelogError),

  /// I/O errors
  Io(io::Error),

  /// Some target files were skipped or failed under `--strict`
  Incomplete { skipped: usize, failed: usize },

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ScribeError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ScribeError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ScribeError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  ///
  /// Typed errors are converted into a message so the context is never lost;
  /// their help text is carried over.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ScribeError::Message { message, context, help } => ScribeError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      other => {
        let help = other.help_message();
        ScribeError::Message {
          message: ctx_str,
          context: Some(other.to_string()),
          help,
        }
      }
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ScribeError::Config(_) => ExitCode::User,
      ScribeError::Version(_) => ExitCode::Validation,
      ScribeError::Changelog(_) => ExitCode::Validation,
      ScribeError::Io(_) => ExitCode::System,
      ScribeError::Incomplete { .. } => ExitCode::Validation,
      ScribeError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ScribeError::Config(e) => e.help_message(),
      ScribeError::Version(e) => e.help_message(),
      ScribeError::Changelog(e) => e.help_message(),
      ScribeError::Message { help, .. } => help.clone(),
      ScribeError::Incomplete { .. } => {
        Some("Fix the skipped files listed above, or drop --strict to accept a partial update.".to_string())
      }
      ScribeError::Io(_) => None,
    }
  }
}

impl fmt::Display for ScribeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ScribeError::Config(e) => write!(f, "{}", e),
      ScribeError::Version(e) => write!(f, "{}", e),
      ScribeError::Changelog(e) => write!(f, "{}", e),
      ScribeError::Io(e) => write!(f, "I/O error: {}", e),
      ScribeError::Incomplete { skipped, failed } => {
        write!(f, "Release incomplete: {} file(s) skipped, {} failed", skipped, failed)
      }
      ScribeError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ScribeError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ScribeError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ScribeError {
  fn from(err: io::Error) -> Self {
    ScribeError::Io(err)
  }
}

impl From<String> for ScribeError {
  fn from(msg: String) -> Self {
    ScribeError::message(msg)
  }
}

impl From<&str> for ScribeError {
  fn from(msg: &str) -> Self {
    ScribeError::message(msg)
  }
}

impl From<ConfigError> for ScribeError {
  fn from(err: ConfigError) -> Self {
    ScribeError::Config(err)
  }
}

impl From<VersionError> for ScribeError {
  fn from(err: VersionError) -> Self {
    ScribeError::Version(err)
  }
}

impl From<ChangelogError> for ScribeError {
  fn from(err: ChangelogError) -> Self {
    ScribeError::Changelog(err)
  }
}

impl From<toml_edit::de::Error> for ScribeError {
  fn from(err: toml_edit::de::Error) -> Self {
    ScribeError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for ScribeError {
  fn from(err: toml_edit::ser::Error) -> Self {
    ScribeError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for ScribeError {
  fn from(err: serde_json::Error) -> Self {
    ScribeError::message(format!("JSON error: {}", err))
  }
}

impl From<regex::Error> for ScribeError {
  fn from(err: regex::Error) -> Self {
    ScribeError::message(format!("Invalid regular expression: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// scribe.toml not found
  NotFound { search_root: PathBuf },

  /// Missing required field
  MissingField { field: String },

  /// A search or header pattern failed to compile
  InvalidPattern { pattern: String, reason: String },

  /// No `type = "source"` entry to read the current version from
  NoSourceFile,
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => Some("Run `release-scribe init` to create a configuration file.".to_string()),
      ConfigError::NoSourceFile => Some("Add a `[[files]]` entry with `type = \"source\"` to scribe.toml.".to_string()),
      ConfigError::InvalidPattern { .. } => {
        Some("Patterns use Rust regex syntax; escape literal brackets and dots with `\\\\`.".to_string())
      }
      ConfigError::MissingField { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { search_root } => {
        write!(
          f,
          "No release-scribe configuration found.\nExpected file: {}/scribe.toml",
          search_root.display()
        )
      }
      ConfigError::MissingField { field } => {
        write!(f, "Missing required field in config: {}", field)
      }
      ConfigError::InvalidPattern { pattern, reason } => {
        write!(f, "Invalid pattern '{}': {}", pattern, reason)
      }
      ConfigError::NoSourceFile => write!(f, "No source file configured to read the current version from"),
    }
  }
}

/// Version parsing and extraction errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
  /// Text does not decompose into exactly three non-negative integers
  Malformed { input: String },

  /// No recognized version declaration in the source text
  NotFound { location: String },

  /// Patch component is already at its maximum
  Overflow { version: String },
}

impl VersionError {
  fn help_message(&self) -> Option<String> {
    match self {
      VersionError::Malformed { .. } => Some("Versions must look like MAJOR.MINOR.PATCH, e.g. 1.0.2".to_string()),
      VersionError::NotFound { .. } => Some(
        "Declare the version as `Version: 1.0.2` in a header comment or `define('PLUGIN_VERSION', '1.0.2')`."
          .to_string(),
      ),
      VersionError::Overflow { .. } => Some("Set the next version explicitly with --version".to_string()),
    }
  }
}

impl fmt::Display for VersionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      VersionError::Malformed { input } => write!(f, "Malformed version '{}'", input),
      VersionError::NotFound { location } => write!(f, "Could not extract version from {}", location),
      VersionError::Overflow { version } => write!(f, "Version {} has no next patch release", version),
    }
  }
}

impl std::error::Error for VersionError {}

/// Changelog document errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangelogError {
  /// No pair of adjacent lines matched the header pattern
  HeaderNotFound { pattern: String },
}

impl ChangelogError {
  fn help_message(&self) -> Option<String> {
    match self {
      ChangelogError::HeaderNotFound { .. } => Some(
        "The header pattern is matched against two adjacent lines joined together; include `\\n` between title and underline."
          .to_string(),
      ),
    }
  }
}

impl fmt::Display for ChangelogError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ChangelogError::HeaderNotFound { pattern } => write!(f, "Could not find header pattern '{}'", pattern),
    }
  }
}

impl std::error::Error for ChangelogError {}

/// Result type alias for release-scribe
pub type ScribeResult<T> = Result<T, ScribeError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ScribeResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ScribeResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ScribeError>,
{
  fn context(self, ctx: impl Into<String>) -> ScribeResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ScribeResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ScribeError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
