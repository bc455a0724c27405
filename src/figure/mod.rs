//! Typed figure model read from a stored configuration.

pub mod spec;
