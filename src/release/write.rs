//! Atomic write-back of updated files

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace `path` with `content` via a temp file in the same directory
///
/// The target's permissions are carried over; a crash mid-write leaves the
/// original file intact.
pub fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
  let dir = match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };

  let mut tmp = NamedTempFile::new_in(dir)?;
  tmp.write_all(content.as_bytes())?;
  tmp.as_file().sync_all()?;

  if let Ok(metadata) = fs::metadata(path) {
    tmp.as_file().set_permissions(metadata.permissions())?;
  }

  tmp.persist(path).map_err(|e| e.error)?;
  Ok(())
}
