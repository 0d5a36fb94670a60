//! Domain types for the shelf catalog.
//!
//! - Book: one catalog entry with its loan status

pub mod book;

pub use book::{Book, BookStatus};
