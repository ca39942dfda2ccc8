//! Shared presentation of prepared releases: plan, diffs, write-back, summary

use crate::core::error::{ScribeError, ScribeResult};
use crate::core::plan::{Operation, Plan};
use crate::release::{PreparedRelease, apply_changes};
use crate::ui::{count_changes, unified_diff};
use serde::Serialize;

/// How a prepared release is shown and whether it is written
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputMode {
  /// Write files (default: dry-run)
  pub apply: bool,
  /// Print JSON instead of the human-readable plan
  pub json: bool,
  /// Any skipped or failed file fails the run
  pub strict: bool,
}

/// Final state of one target file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
  /// Would be written (dry-run)
  Planned { path: String },
  Updated { path: String },
  Skipped { path: String, reason: String },
  Failed { path: String, reason: String },
}

impl FileOutcome {
  fn is_problem(&self) -> bool {
    matches!(self, FileOutcome::Skipped { .. } | FileOutcome::Failed { .. })
  }
}

/// JSON document printed with `--json`
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
  applied: bool,
  plan: &'a Plan,
  outcomes: &'a [FileOutcome],
}

/// Print a prepared release, write it when asked, and summarize
pub fn present(prepared: &PreparedRelease, mode: OutputMode) -> ScribeResult<()> {
  let PreparedRelease { plan, changes } = prepared;

  if !mode.json {
    println!("{}", plan.to_human_readable());
  }

  let mut outcomes: Vec<FileOutcome> = plan
    .skips()
    .filter_map(|op| match op {
      Operation::Skip { path, reason } => Some(FileOutcome::Skipped {
        path: path.clone(),
        reason: reason.clone(),
      }),
      _ => None,
    })
    .collect();

  // Under --strict a partial update is never written
  let write = mode.apply && !(mode.strict && !outcomes.is_empty());
  if mode.apply && !write {
    tracing::warn!(skipped = outcomes.len(), "strict mode: nothing written");
  }

  if write {
    let report = apply_changes(changes);
    outcomes.extend(report.written.into_iter().map(|path| FileOutcome::Updated { path }));
    outcomes.extend(
      report
        .failed
        .into_iter()
        .map(|(path, reason)| FileOutcome::Failed { path, reason }),
    );
  } else {
    if !mode.json {
      for change in changes {
        let (inserted, deleted) = count_changes(&change.original, &change.updated);
        println!("📝 {} (+{} -{})", change.display, inserted, deleted);
        print!("{}", unified_diff(&change.display, &change.original, &change.updated));
        println!();
      }
    }
    outcomes.extend(changes.iter().map(|c| FileOutcome::Planned {
      path: c.display.clone(),
    }));
  }

  if mode.json {
    let report = JsonReport {
      applied: write,
      plan,
      outcomes: &outcomes,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
  } else {
    print_summary(&outcomes, write);
  }

  let skipped = outcomes
    .iter()
    .filter(|o| matches!(o, FileOutcome::Skipped { .. }))
    .count();
  let failed = outcomes
    .iter()
    .filter(|o| matches!(o, FileOutcome::Failed { .. }))
    .count();

  if mode.strict && outcomes.iter().any(FileOutcome::is_problem) {
    return Err(ScribeError::Incomplete { skipped, failed });
  }

  Ok(())
}

fn print_summary(outcomes: &[FileOutcome], applied: bool) {
  let mut planned = 0;
  let mut updated = 0;
  let mut skipped = 0;
  let mut failed = 0;

  for outcome in outcomes {
    match outcome {
      FileOutcome::Planned { .. } => planned += 1,
      FileOutcome::Updated { path } => {
        updated += 1;
        println!("   ✅ Updated {}", path);
      }
      FileOutcome::Skipped { path, reason } => {
        skipped += 1;
        println!("   ⚠️  Skipped {}: {}", path, reason);
      }
      FileOutcome::Failed { path, reason } => {
        failed += 1;
        println!("   ❌ Failed {}: {}", path, reason);
      }
    }
  }

  println!();
  if applied {
    println!(
      "✅ {} file(s) updated, {} skipped, {} failed",
      updated, skipped, failed
    );
  } else {
    println!("🔍 Dry-run: {} file(s) would change, {} skipped", planned, skipped);
    println!("   Re-run with --apply to write the changes");
  }
}
