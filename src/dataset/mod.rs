//! Tabular input: column-oriented cells and the HTTP loader.

pub mod fetch;
pub mod table;
