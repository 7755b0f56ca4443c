//! Utility functions module
//!
//! Contains helpers for size formatting and bandwidth unit conversion.

pub mod units;

// Re-export commonly used functions
pub use units::{format_bytes, kib_to_mib, GIB, MIB};
