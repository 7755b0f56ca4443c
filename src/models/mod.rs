//! Data models module
//!
//! Contains the workload result structures and the typed schema of
//! fio's JSON report.

pub mod fio;
pub mod result;

// Re-export commonly used types
pub use fio::{ensure_complete, parse, ParseError, RawBenchmarkOutput};
pub use result::{WorkloadId, WorkloadResult, WorkloadResults};
