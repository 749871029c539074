//! Verification report reading
//!
//! A verification report is JSON-Lines, one record per scanned path, and is
//! usually gzip-compressed. Only records whose `scanResult` is
//! `MISSING_ON_SOURCE` matter here; their `targetPath` becomes a deletion
//! candidate.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::error::input::{report_not_a_file, report_not_found, report_read_failed};
use crate::planner::CandidateSet;

/// Report file name inside a verification results directory
pub const DISCREPANCY_REPORT: &str = "verification-discrepancy.jsonl.gz";

/// `scanResult` value selecting a candidate
pub const MISSING_ON_SOURCE: &str = "MISSING_ON_SOURCE";

/// One line of the report; fields not listed here are ignored
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiscrepancyRecord {
    #[serde(default)]
    pub scan_result: Option<String>,
    #[serde(default)]
    pub target_path: Option<String>,
    #[serde(default)]
    pub source_path: Option<String>,
}

impl DiscrepancyRecord {
    pub fn is_missing_on_source(&self) -> bool {
        self.scan_result.as_deref() == Some(MISSING_ON_SOURCE)
    }
}

/// Counters gathered while reading a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStats {
    pub lines: usize,
    pub missing_on_source: usize,
    pub skipped: usize,
}

/// Paths missing on the source plus reading statistics
#[derive(Debug, Clone, Default)]
pub struct VerificationReport {
    pub candidates: CandidateSet,
    pub stats: ReportStats,
}

/// Location of the discrepancy report inside a verification directory
pub fn report_in_directory(dir: &Path) -> PathBuf {
    dir.join(DISCREPANCY_REPORT)
}

/// Read a report file, decompressing it when the name ends in `.gz`
pub fn read_report(path: &Path) -> Result<VerificationReport> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(report_not_found(display));
    }
    if !path.is_file() {
        return Err(report_not_a_file(display));
    }

    let file = File::open(path).map_err(|e| report_read_failed(&display, e.to_string()))?;
    let compressed = path.extension().is_some_and(|ext| ext == "gz");

    let reader: Box<dyn Read> = if compressed {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };

    parse_report(BufReader::new(reader)).map_err(|e| report_read_failed(&display, e.to_string()))
}

/// Collect candidates from JSON-Lines input
///
/// Undecodable lines are logged and skipped. I/O failures, including corrupt
/// compression and invalid UTF-8, abort the read.
pub fn parse_report<R: BufRead>(reader: R) -> std::io::Result<VerificationReport> {
    let mut report = VerificationReport::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        report.stats.lines += 1;

        if line.trim().is_empty() {
            continue;
        }

        let record: DiscrepancyRecord = match serde_json::from_str(&line) {
            Ok(record) => record,
            Err(e) => {
                warn!(line = line_no, error = %e, "Skipping undecodable report line");
                report.stats.skipped += 1;
                continue;
            }
        };

        if !record.is_missing_on_source() {
            continue;
        }

        match record.target_path {
            Some(target) => {
                debug!(path = %target, source = ?record.source_path, "MISSING_ON_SOURCE");
                report.stats.missing_on_source += 1;
                report.candidates.insert(target);
            }
            None => {
                warn!(line = line_no, "Skipping MISSING_ON_SOURCE record without targetPath");
                report.stats.skipped += 1;
            }
        }
    }

    Ok(report)
}
