//! fio executable provisioning
//!
//! A [`Provisioner`] hands out the path of a fio binary together with a
//! handle that must be given back once benchmarking is over. [`FioLease`]
//! returns the handle on drop so every exit path releases it.

use crate::config::AppConfig;
use crate::{Result, TyuDiskError};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[cfg(windows)]
pub const FIO_BINARY: &str = "fio.exe";
#[cfg(not(windows))]
pub const FIO_BINARY: &str = "fio";

/// Source of a fio executable
pub trait Provisioner {
    /// Whatever must be handed back to undo the acquisition
    type Handle;

    /// Obtain a fio executable
    fn acquire(&self) -> Result<(PathBuf, Self::Handle)>;

    /// Undo an acquisition
    fn release(&self, handle: Self::Handle);
}

/// An acquired fio executable, released when dropped
pub struct FioLease<'a, P: Provisioner> {
    provisioner: &'a P,
    path: PathBuf,
    handle: Option<P::Handle>,
}

impl<'a, P: Provisioner> FioLease<'a, P> {
    pub fn acquire(provisioner: &'a P) -> Result<Self> {
        let (path, handle) = provisioner.acquire()?;
        info!("Using fio at {}", path.display());
        Ok(Self {
            provisioner,
            path,
            handle: Some(handle),
        })
    }

    /// Path of the fio executable
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<P: Provisioner> Drop for FioLease<'_, P> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.provisioner.release(handle);
        }
    }
}

/// fio already installed on the host
#[derive(Debug, Clone, Default)]
pub struct SystemFio {
    explicit: Option<PathBuf>,
    search_path: Option<OsString>,
}

impl SystemFio {
    /// Use `explicit` when given, otherwise search `PATH`
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self {
            explicit,
            search_path: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.fio_path.clone())
    }

    /// Search these directories instead of the process `PATH`
    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    fn find_in_path(&self) -> Option<PathBuf> {
        let search_path = self
            .search_path
            .clone()
            .or_else(|| std::env::var_os("PATH"))?;

        std::env::split_paths(&search_path)
            .map(|dir| dir.join(FIO_BINARY))
            .find(|candidate| is_executable(candidate))
    }
}

impl Provisioner for SystemFio {
    type Handle = ();

    fn acquire(&self) -> Result<(PathBuf, ())> {
        if let Some(path) = &self.explicit {
            if !path.is_file() {
                return Err(TyuDiskError::ProvisionError(format!(
                    "configured fio_path is not a file: {}",
                    path.display()
                )));
            }
            return Ok((path.clone(), ()));
        }

        self.find_in_path()
            .map(|path| (path, ()))
            .ok_or_else(|| {
                TyuDiskError::ProvisionError(format!("{} executable not found in PATH", FIO_BINARY))
            })
    }

    fn release(&self, _handle: ()) {
        debug!("Released system fio");
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::tempdir;

    struct CountingProvisioner {
        path: PathBuf,
        released: Cell<usize>,
    }

    impl Provisioner for CountingProvisioner {
        type Handle = u32;

        fn acquire(&self) -> Result<(PathBuf, u32)> {
            Ok((self.path.clone(), 7))
        }

        fn release(&self, handle: u32) {
            assert_eq!(handle, 7);
            self.released.set(self.released.get() + 1);
        }
    }

    #[test]
    fn test_lease_releases_once_on_drop() {
        let provisioner = CountingProvisioner {
            path: PathBuf::from("/opt/fio/bin/fio"),
            released: Cell::new(0),
        };

        {
            let lease = FioLease::acquire(&provisioner).unwrap();
            assert_eq!(lease.path(), Path::new("/opt/fio/bin/fio"));
            assert_eq!(provisioner.released.get(), 0);
        }
        assert_eq!(provisioner.released.get(), 1);
    }

    #[test]
    fn test_lease_released_on_error_path() {
        fn failing_run(provisioner: &CountingProvisioner) -> Result<()> {
            let _lease = FioLease::acquire(provisioner)?;
            Err(TyuDiskError::ExecutionError("boom".to_string()))
        }

        let provisioner = CountingProvisioner {
            path: PathBuf::from("fio"),
            released: Cell::new(0),
        };
        assert!(failing_run(&provisioner).is_err());
        assert_eq!(provisioner.released.get(), 1);
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let fio = SystemFio::new(Some(PathBuf::from("/definitely/not/fio")));
        assert!(matches!(fio.acquire(), Err(TyuDiskError::ProvisionError(_))));
    }

    #[test]
    fn test_explicit_path_is_used() {
        let dir = tempdir().unwrap();
        let binary = dir.path().join("my-fio");
        std::fs::write(&binary, b"").unwrap();

        let (path, ()) = SystemFio::new(Some(binary.clone())).acquire().unwrap();
        assert_eq!(path, binary);
    }

    #[test]
    fn test_not_found_in_search_path() {
        let dir = tempdir().unwrap();
        let fio = SystemFio::default().with_search_path(dir.path().as_os_str());
        match fio.acquire() {
            Err(TyuDiskError::ProvisionError(msg)) => assert!(msg.contains("not found")),
            other => panic!("unexpected result: {:?}", other.map(|(p, _)| p)),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_found_in_search_path() {
        use std::os::unix::fs::PermissionsExt;

        let empty = tempdir().unwrap();
        let dir = tempdir().unwrap();
        let binary = dir.path().join(FIO_BINARY);
        std::fs::write(&binary, b"#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o755)).unwrap();

        let search = std::env::join_paths([empty.path(), dir.path()]).unwrap();
        let (path, ()) = SystemFio::default().with_search_path(search).acquire().unwrap();
        assert_eq!(path, binary);
    }
}
