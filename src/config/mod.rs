//! Persisted figure configuration: ordered pairs, typed values and the
//! defaults merger.

pub mod merge;
pub mod store;
pub mod value;
