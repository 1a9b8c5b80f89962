//! File backend for the matchday ledger.
//!
//! Every write is a whole-file replacement: the new content is written to a
//! temporary sibling and renamed over the target, so an interrupted run
//! leaves either the old file or the new one.

mod atomic;
mod register;
mod store;

pub mod error;

pub use atomic::write_atomic;
pub use error::{Error, Result};
pub use register::{load_register, save_register};
pub use store::FileStore;
