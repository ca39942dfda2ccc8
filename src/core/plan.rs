//! Plan-based file updates for reviewable, dry-run-first workflows
//!
//! Every mutating command produces a `Plan` before anything is written:
//!
//! - **Dry-run mode**: show what will happen without writing
//! - **Idempotency**: same inputs → same plan → same plan ID
//! - **Auditability**: plans are JSON-serializable for CI logs
//!
//! ```text
//! Command (apply, changelog)
//!   ↓
//! Plan (what to change, what to skip)
//!   ↓
//! write-back (only with --apply)
//! ```

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Plan identifier (SHA256 hash of plan operations)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanId(String);

impl PlanId {
  /// Create a plan ID from plan contents
  pub fn from_contents(contents: &[u8]) -> Self {
    let mut hasher = Sha256::new();
    hasher.update(contents);
    let result = hasher.finalize();
    Self(format!("{:x}", result))
  }

  /// Get the short ID (first 12 characters)
  pub fn short(&self) -> &str {
    &self.0[..12.min(self.0.len())]
  }
}

impl fmt::Display for PlanId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.short())
  }
}

/// A single planned change (or deliberate non-change) to a target file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
  /// Rewrite version strings in a source file
  BumpVersion {
    path: String,
    from: String,
    to: String,
    replacements: usize,
  },

  /// Insert a dated entry into a changelog
  InsertEntry {
    path: String,
    version: String,
    date: String,
    /// Zero-based line of the new introducer
    line: usize,
    /// Previous highest entry the new one sits above
    above: Option<String>,
  },

  /// Leave a file alone, with the reason
  Skip { path: String, reason: String },
}

impl Operation {
  #[allow(dead_code)] // Used in tests
  pub fn path(&self) -> &str {
    match self {
      Operation::BumpVersion { path, .. } | Operation::InsertEntry { path, .. } | Operation::Skip { path, .. } => path,
    }
  }

  pub fn is_skip(&self) -> bool {
    matches!(self, Operation::Skip { .. })
  }
}

/// Type of plan
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
  /// Full release: version bump plus changelogs
  Release,
  /// A single changelog entry
  Changelog,
}

impl fmt::Display for OperationType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      OperationType::Release => write!(f, "release"),
      OperationType::Changelog => write!(f, "changelog"),
    }
  }
}

/// Plan metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanMetadata {
  /// Plan ID (content hash)
  pub id: PlanId,

  /// What operation this plan represents
  pub operation_type: OperationType,

  /// Version found in the source file, if one was read
  pub current_version: Option<String>,

  /// Version being released
  pub next_version: String,

  /// Entry date
  pub date: String,
}

/// A plan is the ordered list of per-file operations for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
  /// Plan metadata
  pub metadata: PlanMetadata,

  /// Operations, in config order
  pub operations: Vec<Operation>,

  /// Changelog body used for new entries
  pub entry: String,
}

impl Plan {
  /// Create a new plan
  pub fn new(
    operation_type: OperationType,
    current_version: Option<String>,
    next_version: impl Into<String>,
    date: impl Into<String>,
    entry: impl Into<String>,
  ) -> Self {
    let mut plan = Self {
      metadata: PlanMetadata {
        id: PlanId::from_contents(&[]),
        operation_type,
        current_version,
        next_version: next_version.into(),
        date: date.into(),
      },
      operations: Vec::new(),
      entry: entry.into(),
    };
    plan.recompute_id();
    plan
  }

  /// Add an operation to the plan
  pub fn add_operation(&mut self, operation: Operation) {
    self.operations.push(operation);
    self.recompute_id();
  }

  /// Recompute plan ID from version, date, entry and operations
  fn recompute_id(&mut self) {
    let key = (
      &self.metadata.next_version,
      &self.metadata.date,
      &self.entry,
      &self.operations,
    );
    let json = serde_json::to_vec(&key).unwrap_or_default();
    self.metadata.id = PlanId::from_contents(&json);
  }

  /// Operations that leave a file alone
  pub fn skips(&self) -> impl Iterator<Item = &Operation> {
    self.operations.iter().filter(|op| op.is_skip())
  }

  /// Get human-readable representation
  pub fn to_human_readable(&self) -> String {
    let mut output = String::new();

    output.push_str(&format!(
      "📋 Plan: {} ({})\n",
      self.metadata.operation_type, self.metadata.id
    ));

    match &self.metadata.current_version {
      Some(current) => output.push_str(&format!(
        "   Version: {} → {}\n",
        current, self.metadata.next_version
      )),
      None => output.push_str(&format!("   Version: {}\n", self.metadata.next_version)),
    }
    output.push_str(&format!("   Date:    {}\n", self.metadata.date));

    if !self.entry.is_empty() {
      output.push_str("\n   Entry:\n");
      for line in self.entry.lines() {
        output.push_str(&format!("     {}\n", line));
      }
    }

    output.push_str(&format!("\n   Operations ({}):\n", self.operations.len()));

    for (i, op) in self.operations.iter().enumerate() {
      output.push_str(&format!("   {}. {}\n", i + 1, operation_to_string(op)));
    }

    output
  }
}

/// Convert operation to human-readable string
fn operation_to_string(op: &Operation) -> String {
  match op {
    Operation::BumpVersion {
      path,
      from,
      to,
      replacements,
    } => format!("Bump {} → {} in {} ({} replacements)", from, to, path, replacements),
    Operation::InsertEntry {
      path,
      version,
      date,
      line,
      above,
    } => match above {
      Some(prev) => format!(
        "Insert {} ({}) into {} at line {}, above {}",
        version,
        date,
        path,
        line + 1,
        prev
      ),
      None => format!("Insert {} ({}) into {} at line {}", version, date, path, line + 1),
    },
    Operation::Skip { path, reason } => format!("Skip {}: {}", path, reason),
  }
}
