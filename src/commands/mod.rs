//! CLI commands for release-scribe
//!
//! - **apply**: full release flow for a pull request (bump + changelogs)
//! - **version**: show the current and next version
//! - **changelog**: insert one entry into a single changelog
//! - **init**: write a starter scribe.toml
//!
//! All commands accept `&ScribeContext`; mutating ones are dry-run unless
//! `--apply` is given.

pub mod apply;
pub mod changelog;
pub mod init;
pub mod report;
pub mod version;

pub use apply::{ApplyArgs, run_apply};
pub use changelog::{ChangelogArgs, run_changelog};
pub use init::run_init;
pub use report::OutputMode;
pub use version::run_version;
