//! Console report
//!
//! Banner, result table and timestamps. Rows always follow the fixed
//! workload order, whatever order fio reported the jobs in.

use crate::models::fio::ensure_complete;
use crate::models::result::{WorkloadId, WorkloadResults};
use crate::Result;
use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use crossterm::style::Stylize;
use std::io::Write;

const RULE: &str = "-----------------------------------------------------------------------------";
const BANNER: &str = "-------------------------------- TyuDiskMark --------------------------------";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const BEIJING_OFFSET_SECS: i32 = 8 * 3600;

/// Banner and column header, printed before testing starts
pub fn write_banner(out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", BANNER)?;
    writeln!(out, "Developer             : ShirakawaTyu")?;
    writeln!(out, "Last Maintaining      : 2025-08-08")?;
    writeln!(out, "GitHub                : github.com/shirakawatyu/tyu-disk")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "{:<32} {:<32} {:<25}", "Test", "Read(MB/s)", "Write(MB/s)")?;
    out.flush()?;
    Ok(())
}

/// One row per workload; fails without printing if any workload is missing
pub fn write_rows(out: &mut impl Write, results: &WorkloadResults) -> Result<()> {
    ensure_complete(results)?;

    for id in WorkloadId::ALL {
        let result = &results[&id];
        let name = format!("{:<32}", result.id.as_str()).yellow();
        let figures = format!("{:<32.2} {:<11.2}", result.read_mbps, result.write_mbps).blue();
        writeln!(out, "{} {}", name, figures)?;
    }
    out.flush()?;
    Ok(())
}

/// Closing rule with local and Beijing (UTC+8) time
pub fn write_footer(out: &mut impl Write, now: DateTime<Utc>) -> Result<()> {
    let local = now.with_timezone(&Local);
    let beijing_tz = FixedOffset::east_opt(BEIJING_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
    let beijing = now.with_timezone(&beijing_tz);

    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "系统时间： {} {}",
        local.format(TIMESTAMP_FORMAT),
        local.format("%Z")
    )?;
    writeln!(out, "北京时间： {} CST", beijing.format(TIMESTAMP_FORMAT))?;
    writeln!(out, "{}", RULE)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::result::WorkloadResult;
    use crate::{ParseError, TyuDiskError};
    use chrono::TimeZone;

    fn full_results() -> WorkloadResults {
        WorkloadId::ALL
            .into_iter()
            .enumerate()
            .map(|(i, id)| {
                let mut result = WorkloadResult::new(id);
                result.read_mbps = 100.0 * (i + 1) as f64;
                result.write_mbps = 10.0 * (i + 1) as f64 + 0.5;
                (id, result)
            })
            .collect()
    }

    fn render(results: &WorkloadResults) -> Result<String> {
        let mut out = Vec::new();
        write_rows(&mut out, results)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_rows_follow_fixed_order() {
        let text = render(&full_results()).unwrap();
        let positions: Vec<usize> = WorkloadId::ALL
            .iter()
            .map(|id| text.find(id.as_str()).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_rows_use_two_decimals() {
        let text = render(&full_results()).unwrap();
        assert!(text.contains("100.00"));
        assert!(text.contains("10.50"));
        assert!(text.contains("400.00"));
    }

    #[test]
    fn test_missing_workload_prints_nothing() {
        let mut results = full_results();
        results.remove(&WorkloadId::Rnd4KQ32T1);

        let mut out = Vec::new();
        let err = write_rows(&mut out, &results).unwrap_err();
        assert!(out.is_empty());
        match err {
            TyuDiskError::Parse(ParseError::IncompleteResults(missing)) => {
                assert_eq!(missing, vec![WorkloadId::Rnd4KQ32T1])
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_banner_header() {
        let mut out = Vec::new();
        write_banner(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(BANNER));
        let header = text.lines().last().unwrap();
        assert!(header.starts_with("Test"));
        assert_eq!(header.find("Read(MB/s)"), Some(33));
        assert_eq!(header.find("Write(MB/s)"), Some(66));
    }

    #[test]
    fn test_footer_beijing_time() {
        let now = Utc.with_ymd_and_hms(2025, 8, 8, 20, 30, 5).unwrap();
        let mut out = Vec::new();
        write_footer(&mut out, now).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("北京时间： 2025-08-09 04:30:05 CST"));
        assert!(text.contains("系统时间： "));
        assert_eq!(text.lines().filter(|l| *l == RULE).count(), 2);
    }

    #[test]
    fn test_footer_beijing_time_crosses_year() {
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 16, 0, 0).unwrap();
        let mut out = Vec::new();
        write_footer(&mut out, now).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("北京时间： 2025-01-01 00:00:00 CST"));
    }
}
