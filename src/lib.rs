//! Convert a StarDict dictionary into a SQLite database.
//!
//! This crate provides the storage side of the conversion: a [`DictStore`]
//! that builds the two-table schema (`main` for word/definition rows, `syn`
//! for synonym cross-references) in an in-memory database and materializes
//! it to a named `.db` file. Reading the StarDict file format and feeding
//! rows in is the job of an external driver.

// Declare modules
pub mod error;
pub mod models;
pub mod store;

// Re-export key types for easier use
pub use error::{Result, StoreError};
pub use models::{SynonymEntry, WordEntry};
pub use store::{DictStore, escape_literal};
