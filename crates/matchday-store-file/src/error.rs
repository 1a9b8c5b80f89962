//! Error type for `matchday-store-file`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("i/o error on {}: {source}", .path.display())]
  Io {
    path:   PathBuf,
    source: std::io::Error,
  },

  /// The existing file could not be read back. It is left untouched.
  #[error("refusing to overwrite unreadable {}: {source}", .path.display())]
  Corrupt {
    path:   PathBuf,
    source: matchday_csv::Error,
  },
}

impl Error {
  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io { path: path.into(), source }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
