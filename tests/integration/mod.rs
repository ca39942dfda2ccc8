//! CLI integration tests for release-scribe

mod helpers;

mod test_apply;
mod test_changelog;
mod test_init;
