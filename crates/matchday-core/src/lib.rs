//! Core types for the matchday ledger.
//!
//! This crate is deliberately free of HTTP and filesystem dependencies.
//! Scraping, persistence and rendering live in the crates that depend on it.

pub mod address;
pub mod derive;
pub mod error;
pub mod extract;
pub mod ledger;
pub mod observation;
pub mod register;
pub mod season;
pub mod store;

pub use error::{Error, ExtractError, Result};
