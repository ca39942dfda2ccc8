//! Core building blocks shared by every command
//!
//! - **config**: scribe.toml parsing and validation
//! - **context**: explicit run inputs (root, clock, config location)
//! - **error**: error categories with exit codes and help messages
//! - **plan**: reviewable, hashable plans of per-file operations

pub mod config;
pub mod context;
pub mod error;
pub mod plan;
