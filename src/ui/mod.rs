//! Terminal output helpers
//!
//! - **diff**: unified diffs of planned file changes

pub mod diff;

pub use diff::{count_changes, unified_diff};
