//! Persisted appearance registers.

use std::path::Path;

use matchday_core::register::AppearanceRegister;

use crate::{Error, Result, atomic};

/// Load the register at `path`; a missing file is an empty register.
pub fn load_register(path: impl AsRef<Path>) -> Result<AppearanceRegister> {
  let path = path.as_ref();
  match atomic::read_optional(path)? {
    None => Ok(AppearanceRegister::new()),
    Some(text) => matchday_csv::parse_register(&text).map_err(|source| Error::Corrupt {
      path: path.to_path_buf(),
      source,
    }),
  }
}

pub fn save_register(path: impl AsRef<Path>, register: &AppearanceRegister) -> Result<()> {
  atomic::write_atomic(path, matchday_csv::render_register(register).as_bytes())
}
