//! fio parameter (job) file handling
//!
//! The job template is written to a uniquely named temporary file that is
//! removed again when the [`ParamFile`] is dropped.

use crate::{Result, TyuDiskError, PARAM_FILE_PREFIX, PARAM_FILE_SUFFIX};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Temporary fio job file with automatic cleanup
#[derive(Debug)]
pub struct ParamFile {
    file: NamedTempFile,
}

impl ParamFile {
    /// Write `content` to a new temporary file in the system temp directory
    pub fn write(content: &str) -> Result<Self> {
        Self::write_in(&std::env::temp_dir(), content)
    }

    /// Write `content` to a new temporary file inside `dir`
    pub fn write_in(dir: &Path, content: &str) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix(PARAM_FILE_PREFIX)
            .suffix(PARAM_FILE_SUFFIX)
            .tempfile_in(dir)
            .map_err(|e| {
                TyuDiskError::TempFileError(format!(
                    "Failed to create parameter file in {}: {}",
                    dir.display(),
                    e
                ))
            })?;

        let written = file.write_all(content.as_bytes()).and_then(|_| file.flush());
        written.map_err(|e| {
            TyuDiskError::TempFileError(format!(
                "Failed to write parameter file {}: {}",
                file.path().display(),
                e
            ))
        })?;

        debug!("Wrote fio parameter file {}", file.path().display());
        Ok(Self { file })
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
