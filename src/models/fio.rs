//! fio JSON report schema and parser
//!
//! fio prints a preamble (warnings, notices) ahead of the JSON document when
//! run with `--output-format=json`; everything before the first `{` is
//! skipped. The document is decoded into a typed schema so every
//! "does this look like a fio report" check lives here.

use crate::models::result::{WorkloadId, WorkloadResult, WorkloadResults};
use crate::util::units::kib_to_mib;
use serde::Deserialize;
use std::fmt;
use tracing::debug;

/// Text captured from a fio run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBenchmarkOutput(pub String);

impl RawBenchmarkOutput {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Lossy conversion of captured process bytes
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Failures turning fio output into a result set
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The output contains no `{` at all
    NoJsonFound,
    /// Text after the first `{` is not valid JSON
    MalformedDocument(String),
    /// A field the report needs is absent or has the wrong type
    MissingField(String),
    /// One or more workloads produced no job in the report
    IncompleteResults(Vec<WorkloadId>),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::NoJsonFound => write!(f, "no JSON document found in fio output"),
            ParseError::MalformedDocument(msg) => write!(f, "malformed JSON document: {}", msg),
            ParseError::MissingField(msg) => write!(f, "missing or invalid field: {}", msg),
            ParseError::IncompleteResults(missing) => {
                let names: Vec<&str> = missing.iter().map(|id| id.as_str()).collect();
                write!(f, "no results for workload(s): {}", names.join(", "))
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Top-level fio report; only the fields the table needs
#[derive(Debug, Deserialize)]
pub struct FioReport {
    pub jobs: Vec<FioJob>,
}

/// One job entry; direction objects are decoded only for known workloads
#[derive(Debug, Deserialize)]
pub struct FioJob {
    pub jobname: String,
    pub read: Option<serde_json::Value>,
    pub write: Option<serde_json::Value>,
}

/// Per-direction statistics; `bw` is in KiB/s
#[derive(Debug, Deserialize)]
pub struct FioIoStats {
    pub bw: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Read,
    Write,
}

impl Direction {
    fn of_job(name: &str) -> Option<Self> {
        if name.contains("read") {
            Some(Direction::Read)
        } else if name.contains("write") {
            Some(Direction::Write)
        } else {
            None
        }
    }

    fn field(&self) -> &'static str {
        match self {
            Direction::Read => "read",
            Direction::Write => "write",
        }
    }
}

impl FioJob {
    fn bandwidth_kib(&self, direction: Direction) -> Result<f64, ParseError> {
        let field = format!("jobs[{}].{}.bw", self.jobname, direction.field());
        let value = match direction {
            Direction::Read => self.read.as_ref(),
            Direction::Write => self.write.as_ref(),
        };
        let Some(value) = value else {
            return Err(ParseError::MissingField(field));
        };

        let stats = FioIoStats::deserialize(value)
            .map_err(|err| ParseError::MissingField(format!("{}: {}", field, err)))?;
        stats.bw.ok_or(ParseError::MissingField(field))
    }
}

/// Decode the fio report embedded in `raw`
pub fn decode_report(raw: &RawBenchmarkOutput) -> Result<FioReport, ParseError> {
    let text = raw.as_str();
    let start = text.find('{').ok_or(ParseError::NoJsonFound)?;

    // Only the first JSON value is read; stderr appended after the document
    // must not make it malformed.
    let mut values =
        serde_json::Deserializer::from_str(&text[start..]).into_iter::<serde_json::Value>();
    let document = match values.next() {
        Some(Ok(value)) => value,
        Some(Err(err)) => return Err(ParseError::MalformedDocument(err.to_string())),
        None => {
            return Err(ParseError::MalformedDocument(
                "empty document".to_string(),
            ))
        }
    };

    serde_json::from_value(document).map_err(|err| ParseError::MissingField(err.to_string()))
}

/// Parse fio output into per-workload bandwidth in MiB/s
pub fn parse(raw: &RawBenchmarkOutput) -> Result<WorkloadResults, ParseError> {
    let report = decode_report(raw)?;
    let mut results = WorkloadResults::new();

    for job in &report.jobs {
        let Some(id) = WorkloadId::match_job_name(&job.jobname) else {
            debug!("Skipping job '{}': no known workload", job.jobname);
            continue;
        };

        let entry = results
            .entry(id)
            .or_insert_with(|| WorkloadResult::new(id));

        match Direction::of_job(&job.jobname) {
            Some(direction @ Direction::Read) => {
                entry.read_mbps = kib_to_mib(job.bandwidth_kib(direction)?);
            }
            Some(direction @ Direction::Write) => {
                entry.write_mbps = kib_to_mib(job.bandwidth_kib(direction)?);
            }
            None => {
                debug!("Job '{}' is neither read nor write", job.jobname);
            }
        }
        debug!("Parsed job '{}' as {}", job.jobname, id);
    }

    Ok(results)
}

/// Check that every workload has a result; names all missing ones
pub fn ensure_complete(results: &WorkloadResults) -> Result<(), ParseError> {
    let missing: Vec<WorkloadId> = WorkloadId::ALL
        .into_iter()
        .filter(|id| !results.contains_key(id))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ParseError::IncompleteResults(missing))
    }
}
