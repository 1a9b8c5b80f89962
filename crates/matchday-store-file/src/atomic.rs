//! Write-then-rename file replacement.

use std::{
  fs::{self, File},
  io::Write as _,
  path::{Path, PathBuf},
};

use crate::{Error, Result};

/// The temporary sibling used while replacing `path`.
fn temp_path(path: &Path) -> PathBuf {
  let name = path
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_default();
  path.with_file_name(format!(".{name}.tmp"))
}

/// Replace the content of `path` with `bytes`, creating parent directories.
///
/// Data is flushed to disk before the rename.
pub fn write_atomic(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
  let path = path.as_ref();

  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
  }

  let tmp = temp_path(path);
  let written = File::create(&tmp).and_then(|mut file| {
    file.write_all(bytes)?;
    file.sync_all()
  });
  if let Err(e) = written {
    let _ = fs::remove_file(&tmp);
    return Err(Error::io(&tmp, e));
  }

  fs::rename(&tmp, path).map_err(|e| {
    let _ = fs::remove_file(&tmp);
    Error::io(path, e)
  })?;

  tracing::debug!(path = %path.display(), bytes = bytes.len(), "replaced file");
  Ok(())
}

/// Read `path` as UTF-8, treating a missing file as `None`.
pub(crate) fn read_optional(path: &Path) -> Result<Option<String>> {
  match fs::read_to_string(path) {
    Ok(text) => Ok(Some(text)),
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
    Err(e) => Err(Error::io(path, e)),
  }
}
