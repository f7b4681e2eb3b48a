use crossbeam_channel::bounded;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use tracing::{debug, info, warn};

use crate::provider::ThumbnailProvider;
use crate::scaler;
use crate::types::{
    BatchResult, ExtractionMode, ExtractionOutcome, FileEntry, SizeRange, ThumbnailRequest,
};

const REQUEST_QUEUE_FACTOR: usize = 2;

#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    pub mode: ExtractionMode,
    /// Worker thread count; 0 selects the CPU count. Always capped by the
    /// entry count so small batches don't spawn idle threads.
    pub workers: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            mode: ExtractionMode::Default,
            workers: 0,
        }
    }
}

/// Fans the batch out over a bounded worker pool: requests are built (and
/// their resolution scaled) immediately before dispatch on the feeder side,
/// workers call the provider once per entry, and a single consumer folds the
/// outcomes into the `BatchResult`, so the tallies are never shared between
/// threads. Clearing `running` stops further dispatches; in-flight calls are
/// drained and the partial result returned.
pub fn run_batch<P: ThumbnailProvider>(
    entries: &[FileEntry],
    range: SizeRange,
    options: BatchOptions,
    provider: &P,
    running: &AtomicBool,
    progress: Option<&dyn Fn(usize, usize)>,
) -> BatchResult {
    if entries.is_empty() {
        return BatchResult::default();
    }

    let workers = effective_workers(options.workers, entries.len());
    info!(total = entries.len(), workers, "starting batch");

    let (request_tx, request_rx) = bounded::<ThumbnailRequest>(workers * REQUEST_QUEUE_FACTOR);
    let (outcome_tx, outcome_rx) = bounded::<ExtractionOutcome>(workers * REQUEST_QUEUE_FACTOR);

    let mut batch = BatchResult::default();

    thread::scope(|scope| {
        for _ in 0..workers {
            let request_rx = request_rx.clone();
            let outcome_tx = outcome_tx.clone();
            scope.spawn(move || {
                for request in request_rx.iter() {
                    let result = provider.extract(&request);
                    let _ = outcome_tx.send(ExtractionOutcome {
                        path: request.path,
                        result,
                    });
                }
            });
        }
        drop(request_rx);
        drop(outcome_tx);

        // Feed from its own thread so the bounded queue can apply
        // backpressure while this thread drains outcomes.
        scope.spawn(move || {
            for entry in entries {
                if !running.load(Ordering::Acquire) {
                    debug!("cancellation requested, no further dispatches");
                    break;
                }

                let request = ThumbnailRequest {
                    path: entry.path.clone(),
                    resolution: scaler::scale(entry.size, range),
                    mode: options.mode,
                };
                if request_tx.send(request).is_err() {
                    break;
                }
            }
        });

        let total = entries.len();
        let mut done = 0usize;

        for outcome in outcome_rx.iter() {
            done += 1;
            match &outcome.result {
                Ok(()) => debug!(path = %outcome.path.display(), "extracted"),
                Err(error) if error.is_benign() => {
                    debug!(path = %outcome.path.display(), %error, "no thumbnail produced");
                }
                Err(error) => {
                    warn!(path = %outcome.path.display(), %error, "extraction failed");
                }
            }
            batch.record(outcome);

            if let Some(progress) = progress {
                progress(done, total);
            }
        }
    });

    info!(
        succeeded = batch.succeeded,
        suppressed = batch.suppressed,
        failed = batch.failures.len(),
        "batch complete"
    );
    batch
}

fn effective_workers(requested: usize, entries: usize) -> usize {
    let workers = if requested == 0 {
        num_cpus::get()
    } else {
        requested
    };
    workers.clamp(1, entries.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_workers_caps_at_entry_count() {
        assert_eq!(effective_workers(8, 3), 3);
        assert_eq!(effective_workers(2, 100), 2);
    }

    #[test]
    fn effective_workers_never_zero() {
        assert_eq!(effective_workers(0, 0), 1);
        assert_eq!(effective_workers(5, 0), 1);
        assert!(effective_workers(0, 16) >= 1);
    }
}
