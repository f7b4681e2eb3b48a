use serde::Serialize;
use std::path::PathBuf;

use crate::error::ExtractionErrorKind;

pub const MIN_RESOLUTION: u32 = 32;
pub const MAX_RESOLUTION: u32 = 1024;

/// One regular file captured during the scan pass. The size is recorded once
/// and never re-read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
}

/// Byte-size extrema observed across a batch. The minimum is computed over
/// nonzero sizes only; the maximum is a plain max. Both stay 0 until a
/// qualifying size is observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SizeRange {
    pub min: u64,
    pub max: u64,
}

impl SizeRange {
    pub fn observe(&mut self, size: u64) {
        if size > 0 && (self.min == 0 || size < self.min) {
            self.min = size;
        }
        if size > self.max {
            self.max = size;
        }
    }

    /// Width of the range. A hand-built range with `min > max` saturates to
    /// zero and is treated as degenerate rather than panicking.
    #[inline]
    pub fn span(&self) -> u64 {
        self.max.saturating_sub(self.min)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    /// A previously cached thumbnail may satisfy the request.
    Default,
    /// The thumbnail must be re-rendered even when a cached one exists.
    ForceFullExtraction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailRequest {
    pub path: PathBuf,
    pub resolution: u32,
    pub mode: ExtractionMode,
}

/// Result of one provider invocation. Exactly one is produced per dispatched
/// entry.
#[derive(Debug)]
pub struct ExtractionOutcome {
    pub path: PathBuf,
    pub result: Result<(), ExtractionErrorKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureRecord {
    pub path: PathBuf,
    pub error: ExtractionErrorKind,
}

/// Aggregate over a batch of outcomes. Benign failures are counted in
/// `suppressed` and never surfaced in `failures`.
#[derive(Debug, Default, Serialize)]
pub struct BatchResult {
    pub succeeded: usize,
    pub suppressed: usize,
    pub failures: Vec<FailureRecord>,
}

impl BatchResult {
    pub fn record(&mut self, outcome: ExtractionOutcome) {
        match outcome.result {
            Ok(()) => self.succeeded += 1,
            Err(error) if error.is_benign() => self.suppressed += 1,
            Err(error) => self.failures.push(FailureRecord {
                path: outcome.path,
                error,
            }),
        }
    }

    pub fn from_outcomes(outcomes: impl IntoIterator<Item = ExtractionOutcome>) -> Self {
        let mut result = Self::default();
        for outcome in outcomes {
            result.record(outcome);
        }
        result
    }

    /// Total number of entries accounted for, successes and failures alike.
    pub fn processed(&self) -> usize {
        self.succeeded + self.suppressed + self.failures.len()
    }
}
