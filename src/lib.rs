//! tyu-disk - TyuDiskMark
//!
//! Runs a fixed set of fio workloads against the target filesystem and
//! prints sequential and random throughput as a small table.

use std::fmt;

pub mod bench;
pub mod cli;
pub mod config;
pub mod io;
pub mod models;
pub mod report;
pub mod util;

pub use models::fio::ParseError;

// Common error types
#[derive(Debug)]
pub enum TyuDiskError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// The fio executable could not be obtained
    ProvisionError(String),
    /// Parameter file creation failed
    TempFileError(String),
    /// Free space on the target could not be determined
    CapacityError(String),
    /// fio could not be started or did not finish cleanly
    ExecutionError(String),
    /// fio output could not be turned into a complete result set
    Parse(ParseError),
}

impl fmt::Display for TyuDiskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TyuDiskError::IoError(err) => write!(f, "I/O error: {}", err),
            TyuDiskError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            TyuDiskError::ProvisionError(msg) => write!(f, "Cannot obtain fio: {}", msg),
            TyuDiskError::TempFileError(msg) => write!(f, "Temporary file error: {}", msg),
            TyuDiskError::CapacityError(msg) => write!(f, "Free space query failed: {}", msg),
            TyuDiskError::ExecutionError(msg) => write!(f, "fio execution failed: {}", msg),
            TyuDiskError::Parse(err) => write!(f, "Cannot parse fio output: {}", err),
        }
    }
}

impl std::error::Error for TyuDiskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TyuDiskError::IoError(err) => Some(err),
            TyuDiskError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TyuDiskError {
    fn from(err: std::io::Error) -> Self {
        TyuDiskError::IoError(err)
    }
}

impl From<ParseError> for TyuDiskError {
    fn from(err: ParseError) -> Self {
        TyuDiskError::Parse(err)
    }
}

impl From<toml::de::Error> for TyuDiskError {
    fn from(err: toml::de::Error) -> Self {
        TyuDiskError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

/// Result type alias for tyu-disk operations
pub type Result<T> = std::result::Result<T, TyuDiskError>;

// Common types and constants
pub const APP_NAME: &str = "tyu-disk";
pub const CONFIG_FILE: &str = "tyu-disk.toml";
pub const PARAM_FILE_PREFIX: &str = "args";
pub const PARAM_FILE_SUFFIX: &str = ".fio";

/// fio job description bundled with the binary.
pub const FIO_JOB_TEMPLATE: &str = include_str!("../assets/fio-io-test.ini");
