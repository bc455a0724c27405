//! Pure numeric helpers feeding the derived traces.

pub mod summary;
