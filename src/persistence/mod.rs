//! Persistence layer: the flat-file listing history.
//!
//! [`CsvStore`] loads the history once at startup and appends each fetched
//! batch afterwards. Derived columns in the file are informational; the
//! session always recomputes them from `price` and the active parameters.

pub mod csv_store;

pub use csv_store::{CSV_HEADER, CsvLoad, CsvStore};
