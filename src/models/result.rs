//! Workload result data models
//!
//! The four workloads every run reports on, and the per-workload
//! bandwidth collected from fio.

use std::collections::BTreeMap;
use std::fmt;

/// Fixed workload identifiers, declared in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WorkloadId {
    /// Sequential 1 MiB blocks, queue depth 8, one thread
    Seq1MQ8T1,
    /// Sequential 1 MiB blocks, queue depth 1, one thread
    Seq1MQ1T1,
    /// Random 4 KiB blocks, queue depth 32, one thread
    Rnd4KQ32T1,
    /// Random 4 KiB blocks, queue depth 1, one thread
    Rnd4KQ1T1,
}

impl WorkloadId {
    /// Every workload, in the order rows are printed
    pub const ALL: [WorkloadId; 4] = [
        WorkloadId::Seq1MQ8T1,
        WorkloadId::Seq1MQ1T1,
        WorkloadId::Rnd4KQ32T1,
        WorkloadId::Rnd4KQ1T1,
    ];

    /// Identifier as it appears inside fio job names
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadId::Seq1MQ8T1 => "SEQ1MQ8T1",
            WorkloadId::Seq1MQ1T1 => "SEQ1MQ1T1",
            WorkloadId::Rnd4KQ32T1 => "RND4KQ32T1",
            WorkloadId::Rnd4KQ1T1 => "RND4KQ1T1",
        }
    }

    /// Get a human-readable description of the workload
    pub fn description(&self) -> &'static str {
        match self {
            WorkloadId::Seq1MQ8T1 => "Sequential 1MiB, QD8, 1 thread",
            WorkloadId::Seq1MQ1T1 => "Sequential 1MiB, QD1, 1 thread",
            WorkloadId::Rnd4KQ32T1 => "Random 4KiB, QD32, 1 thread",
            WorkloadId::Rnd4KQ1T1 => "Random 4KiB, QD1, 1 thread",
        }
    }

    /// First workload (in report order) whose identifier occurs in `job_name`
    pub fn match_job_name(job_name: &str) -> Option<WorkloadId> {
        Self::ALL
            .into_iter()
            .find(|id| job_name.contains(id.as_str()))
    }
}

impl fmt::Display for WorkloadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read and write bandwidth of one workload, in MiB/s
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadResult {
    pub id: WorkloadId,
    pub read_mbps: f64,
    pub write_mbps: f64,
}

impl WorkloadResult {
    /// Create an empty result; unobserved directions stay at zero
    pub fn new(id: WorkloadId) -> Self {
        Self {
            id,
            read_mbps: 0.0,
            write_mbps: 0.0,
        }
    }

    /// Get a one-line summary of the result
    pub fn summary(&self) -> String {
        format!(
            "{} - read {:.2} MB/s - write {:.2} MB/s",
            self.id.description(),
            self.read_mbps,
            self.write_mbps
        )
    }
}

/// Results keyed by workload; iteration follows report order
pub type WorkloadResults = BTreeMap<WorkloadId, WorkloadResult>;
