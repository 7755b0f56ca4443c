//! End-to-end disk mark run
//!
//! Acquire fio, print the banner, run the workloads, print the table.

use crate::bench::{BenchmarkRunner, FioLease, IoEngine, Provisioner, Spinner};
use crate::config::AppConfig;
use crate::io::{choose_size, ParamFile};
use crate::models::{ensure_complete, parse, WorkloadResults};
use crate::{report, Result, FIO_JOB_TEMPLATE};
use chrono::Utc;
use indicatif::ProgressDrawTarget;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// One tyu-disk run with its collaborators
pub struct DiskMark<'a, P: Provisioner> {
    config: &'a AppConfig,
    provisioner: &'a P,
    show_progress: bool,
}

impl<'a, P: Provisioner> DiskMark<'a, P> {
    pub fn new(config: &'a AppConfig, provisioner: &'a P) -> Self {
        Self {
            config,
            provisioner,
            show_progress: true,
        }
    }

    /// Enable or disable the spinner
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Run every workload and write the full report to `out`
    pub async fn run(&self, out: &mut impl Write) -> Result<()> {
        let lease = FioLease::acquire(self.provisioner)?;

        report::write_banner(out)?;
        let results = self.disk_test(lease.path()).await?;
        report::write_rows(out, &results)?;
        report::write_footer(out, Utc::now())?;
        Ok(())
    }

    /// Run fio once and collect the results of all four workloads
    pub async fn disk_test(&self, fio: &Path) -> Result<WorkloadResults> {
        let param_file = ParamFile::write(FIO_JOB_TEMPLATE)?;
        let size = choose_size(&self.config.target_dir)?;
        let runner = BenchmarkRunner::new(
            fio,
            IoEngine::from_config(self.config),
            &self.config.target_dir,
        );

        let spinner = if self.show_progress {
            Spinner::start("Testing...")
        } else {
            Spinner::start_with_target("Testing...", ProgressDrawTarget::hidden())
        };
        let output = runner.run(param_file.path(), size).await;
        spinner.stop().await;

        let results = parse(&output?)?;
        ensure_complete(&results)?;
        info!("Collected results for {} workloads", results.len());
        for result in results.values() {
            debug!("{}", result.summary());
        }
        Ok(results)
    }
}
