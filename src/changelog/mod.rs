//! Changelog documents and the entry insertion engine
//!
//! - **document**: line model, header lookup, entry discovery
//! - **entry**: rendering of a new `X.Y.Z (YYYY-MM-DD)` block
//! - **insert**: choosing the insertion point and splicing the block in

pub mod document;
pub mod entry;
pub mod insert;

pub use document::ChangelogDocument;
pub use insert::insert_entry;
