//! Book catalog management.
//!
//! # Storage Layout
//!
//! ```text
//! library.json        # JSON array of books, rewritten on every change
//! library.json.corrupt  # previous file, kept if it failed to load
//! ```

pub mod catalog;
pub mod display;

pub use catalog::{Catalog, CatalogError, CorruptionError};
pub use display::{render, EMPTY_LIBRARY};
