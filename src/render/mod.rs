//! Preview plumbing: readiness waits, the charting library seam and the
//! session that ties compile and plot together.

pub mod adapter;
pub mod readiness;
pub mod session;
