//! Test size selection from available disk space
//!
//! fio lays out a test file of the chosen size in the target directory, so
//! the size is capped to half of the free space on small volumes.

use crate::util::units::{format_bytes, GIB, MIB};
use crate::{Result, TyuDiskError};
use std::fmt;
use std::io;
use std::path::Path;
use tracing::debug;

/// Size argument passed to fio as `--size=`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestSize {
    Gibibytes(u64),
    Mebibytes(u64),
}

impl fmt::Display for TestSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestSize::Gibibytes(n) => write!(f, "{}g", n),
            TestSize::Mebibytes(n) => write!(f, "{}m", n),
        }
    }
}

impl TestSize {
    /// Size in bytes
    pub fn bytes(&self) -> u64 {
        match self {
            TestSize::Gibibytes(n) => n * GIB,
            TestSize::Mebibytes(n) => n * MIB,
        }
    }
}

/// Pick the test size for a volume with `free_bytes` available
pub fn size_for_free_space(free_bytes: u64) -> TestSize {
    if free_bytes >= GIB {
        TestSize::Gibibytes(1)
    } else {
        TestSize::Mebibytes((free_bytes / 2 / MIB).max(1))
    }
}

/// Query free space at `target` and pick the test size
pub fn choose_size(target: &Path) -> Result<TestSize> {
    let free = free_space(target).map_err(|e| {
        TyuDiskError::CapacityError(format!("{}: {}", target.display(), e))
    })?;
    let size = size_for_free_space(free);
    debug!(
        "Free space at {}: {}, test size {} ({})",
        target.display(),
        format_bytes(free),
        size,
        format_bytes(size.bytes())
    );
    Ok(size)
}

/// Bytes available to an unprivileged user on the filesystem holding `path`
#[cfg(unix)]
pub fn free_space(path: &Path) -> io::Result<u64> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let path = if path.as_os_str().is_empty() {
        Path::new(".")
    } else {
        path
    };
    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    if unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(stat.f_bavail as u64 * stat.f_frsize as u64)
}

/// Bytes available to the calling user on the volume holding `path`
#[cfg(windows)]
pub fn free_space(path: &Path) -> io::Result<u64> {
    use std::os::windows::ffi::OsStrExt;

    extern "system" {
        fn GetDiskFreeSpaceExW(
            directory: *const u16,
            free_to_caller: *mut u64,
            total: *mut u64,
            total_free: *mut u64,
        ) -> i32;
    }

    let path = if path.as_os_str().is_empty() {
        Path::new(".")
    } else {
        path
    };
    let mut wide: Vec<u16> = path.as_os_str().encode_wide().collect();
    wide.push(0);

    let mut free_to_caller = 0u64;
    let mut total = 0u64;
    let mut total_free = 0u64;
    let ok = unsafe {
        GetDiskFreeSpaceExW(wide.as_ptr(), &mut free_to_caller, &mut total, &mut total_free)
    };
    if ok == 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(free_to_caller)
}
