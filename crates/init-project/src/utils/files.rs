use std::fs;
use std::io;
use std::path::Path;

/// What `remove_path` found at the given location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Removed {
  File,
  Dir,
  Missing,
}

/// Remove a file, or a directory recursively. A missing path is not an error.
pub fn remove_path(path: &Path) -> io::Result<Removed> {
  let meta = match fs::symlink_metadata(path) {
    Ok(meta) => meta,
    Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Removed::Missing),
    Err(err) => return Err(err),
  };
  if meta.is_dir() {
    fs::remove_dir_all(path)?;
    Ok(Removed::Dir)
  } else {
    fs::remove_file(path)?;
    Ok(Removed::File)
  }
}
