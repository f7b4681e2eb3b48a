use serde::Serialize;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("directory not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Closed taxonomy for per-file extraction failures, surfaced unaltered from
/// the provider boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ExtractionErrorKind {
    #[error("initialization failed: {0}")]
    InitializationFailed(String),

    #[error("path could not be resolved: {0}")]
    PathResolutionFailed(String),

    #[error("extraction capability unavailable: {0}")]
    CapabilityUnavailable(String),

    #[error("invalid request: {0}")]
    InvalidArgument(String),

    #[error("no thumbnail produced: {0}")]
    ExtractionFailedNonFatal(String),

    #[error("extraction timed out: {0}")]
    Timeout(String),

    #[error("required subsystem unreachable: {0}")]
    ResourceUnavailable(String),

    #[error("fast extraction path unsupported: {0}")]
    UnsupportedFastPath(String),
}

impl ExtractionErrorKind {
    /// Benign failures are expected for some files (unsupported content).
    /// They count against the success tally but are kept out of the report.
    pub fn is_benign(&self) -> bool {
        matches!(self, ExtractionErrorKind::ExtractionFailedNonFatal(_))
    }
}
