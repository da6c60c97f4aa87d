//! Depth-first traversal of the mapping forest and grouped report output.

pub mod driver;

pub use driver::{DriverState, ReportDriver, RunLabels, RunOutcome, RunStatus};
