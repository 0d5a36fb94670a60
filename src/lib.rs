//! shelf - personal library catalog
//!
//! Keeps a list of books (title, author, year, loan status) in a local JSON
//! file and offers an interactive menu plus one-shot subcommands to manage
//! it.
//!
//! # Modules
//!
//! - `domain`: Data structures (Book, BookStatus)
//! - `library`: The catalog, its persistence and table rendering
//! - `config`: Data file and logging configuration
//! - `cli`: Command-line interface and interactive shell
//!
//! # Usage
//!
//! ```bash
//! # Interactive menu
//! shelf
//!
//! # One-shot commands
//! shelf add --title "Dune" --author "Frank Herbert" --year 1965
//! shelf search herbert
//! shelf status 1 loaned
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod library;

// Re-export main types at crate root for convenience
pub use domain::{Book, BookStatus};
pub use library::{Catalog, CatalogError, CorruptionError};
