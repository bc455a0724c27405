//! Trace assembly: figure spec plus dataset into the charting library's
//! trace/layout document.

pub mod assembler;
pub mod trace;
