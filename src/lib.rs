pub mod coordinator;
pub mod error;
pub mod provider;
pub mod scaler;
pub mod scanner;
pub mod types;

pub use error::{ExtractionErrorKind, ScanError};
pub use types::{
    BatchResult, ExtractionMode, ExtractionOutcome, FailureRecord, FileEntry, MAX_RESOLUTION,
    MIN_RESOLUTION, SizeRange, ThumbnailRequest,
};
