//! Benchmark engine module
//!
//! Contains fio provisioning, the fio runner and the progress indicator.

pub mod provision;
pub mod runner;
pub mod spinner;

// Re-export commonly used types
pub use provision::{FioLease, Provisioner, SystemFio};
pub use runner::{BenchmarkRunner, IoEngine};
pub use spinner::Spinner;
