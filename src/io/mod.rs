//! Filesystem helpers module
//!
//! Contains the fio parameter file and the free-space based test sizing.

pub mod capacity;
pub mod param_file;

pub use capacity::{choose_size, free_space, size_for_free_space, TestSize};
pub use param_file::ParamFile;
