//! Release orchestration
//!
//! A release pull request (title starting with the release marker) bumps the
//! patch version in the source file and records a dated entry in every
//! configured changelog.
//!
//! - **gate**: release marker detection and title cleanup
//! - **entry_text**: where the changelog body comes from
//! - **substitute**: rewriting version strings in source files
//! - **runner**: planning all edits, then writing them back
//! - **write**: atomic file replacement

pub mod entry_text;
pub mod gate;
pub mod runner;
pub mod substitute;
pub mod write;

pub use gate::is_release_title;
pub use runner::{
  PreparedRelease, PullRequest, apply_changes, current_version, prepare_changelog_entry, prepare_release,
};
