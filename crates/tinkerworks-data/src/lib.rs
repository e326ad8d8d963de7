//! Data-driven catalog loading for Tinkerworks.
//!
//! Reads `materials`, `blueprints` and `recipes` tables from RON, TOML or
//! JSON files in one directory and freezes them into a
//! [`tinkerworks_core::catalog::Catalog`].

pub mod loader;
pub mod schema;

pub use loader::{DataLoadError, load_catalog};
