//! Folding the raw records of a run into the two buckets that get reported.

use holehe_common::record::ResultRecord;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunResult {
    pub exists: Vec<ResultRecord>,
    pub rate_limit: Vec<ResultRecord>,
}

/// Sorts by capability name, then keeps records that exist or are rate limited.
///
/// `exists` wins over `rateLimit` when both are set. Records with neither flag
/// are dropped, so completion order never shows in the result.
pub fn classify(mut records: Vec<ResultRecord>) -> RunResult {
    records.sort_by(|a, b| a.name.cmp(&b.name));

    let mut result: RunResult = RunResult::default();
    for record in records {
        if record.exists {
            result.exists.push(record);
        } else if record.rate_limit {
            result.rate_limit.push(record);
        }
    }
    result
}

/// Counters for the end-of-run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub checked: usize,
    pub found: usize,
    pub rate_limited: usize,
    pub faulted: usize,
}

impl RunStats {
    pub fn from_records(records: &[ResultRecord]) -> Self {
        records.iter().fold(
            Self {
                checked: records.len(),
                ..Self::default()
            },
            |mut stats, record| {
                if record.exists {
                    stats.found += 1;
                } else if record.rate_limit {
                    stats.rate_limited += 1;
                }
                if record.error {
                    stats.faulted += 1;
                }
                stats
            },
        )
    }
}
