//! fio invocation
//!
//! Builds the fio command line, runs it to completion and captures its
//! output. There is no timeout: a hung fio hangs the run.

use crate::config::AppConfig;
use crate::io::capacity::TestSize;
use crate::models::fio::RawBenchmarkOutput;
use crate::{Result, TyuDiskError};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, info};

/// Default fio ioengine per platform
#[cfg(windows)]
pub const PLATFORM_IO_ENGINE: &str = "windowsaio";
#[cfg(not(windows))]
pub const PLATFORM_IO_ENGINE: &str = "libaio";

/// Lines of output kept in an execution error message
const ERROR_TAIL_LINES: usize = 5;

/// fio `--ioengine` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoEngine(String);

impl IoEngine {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The engine fio is expected to provide on this platform
    pub fn platform_default() -> Self {
        Self::new(PLATFORM_IO_ENGINE)
    }

    /// Configured override, or the platform default
    pub fn from_config(config: &AppConfig) -> Self {
        config
            .io_engine
            .as_deref()
            .map(|name| Self::new(name.trim()))
            .unwrap_or_else(Self::platform_default)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IoEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Runs fio against a parameter file
#[derive(Debug, Clone)]
pub struct BenchmarkRunner {
    fio_path: PathBuf,
    engine: IoEngine,
    working_dir: PathBuf,
}

impl BenchmarkRunner {
    /// `working_dir` is where fio lays out its test file
    pub fn new(fio_path: &Path, engine: IoEngine, working_dir: &Path) -> Self {
        Self {
            fio_path: fio_path.to_path_buf(),
            engine,
            working_dir: working_dir.to_path_buf(),
        }
    }

    /// Arguments passed to fio
    pub fn args(&self, param_file: &Path, size: TestSize) -> Vec<OsString> {
        vec![
            param_file.as_os_str().to_os_string(),
            OsString::from(format!("--ioengine={}", self.engine)),
            OsString::from(format!("--size={}", size)),
            OsString::from("--output-format=json"),
        ]
    }

    /// Run fio and return stdout followed by stderr
    pub async fn run(&self, param_file: &Path, size: TestSize) -> Result<RawBenchmarkOutput> {
        let args = self.args(param_file, size);
        info!(
            "Running {} {:?} in {}",
            self.fio_path.display(),
            args,
            self.working_dir.display()
        );

        let start_time = Instant::now();
        let output = Command::new(&self.fio_path)
            .args(&args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                TyuDiskError::ExecutionError(format!(
                    "failed to run {}: {}",
                    self.fio_path.display(),
                    e
                ))
            })?;

        let mut combined = output.stdout;
        combined.extend_from_slice(&output.stderr);
        let raw = RawBenchmarkOutput::from_bytes(&combined);

        info!(
            "fio finished with {} after {}",
            output.status,
            humantime::format_duration(start_time.elapsed())
        );
        debug!("Captured {} bytes of fio output", combined.len());

        if !output.status.success() {
            return Err(TyuDiskError::ExecutionError(format!(
                "{} exited with {}: {}",
                self.fio_path.display(),
                output.status,
                output_tail(raw.as_str())
            )));
        }

        Ok(raw)
    }
}

/// Last few non-empty lines of `text`, joined with " | "
fn output_tail(text: &str) -> String {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let skip = lines.len().saturating_sub(ERROR_TAIL_LINES);
    if lines.is_empty() {
        "no output".to_string()
    } else {
        lines[skip..].join(" | ")
    }
}
