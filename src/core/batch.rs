use crate::core::detector::DocumentDetector;
use crate::core::extractor::TextExtractor;
use crate::error::BatchError;
use crate::utils::events::{DetectionEvent, EventSink};
use crate::{DetectionFailure, DetectionResult};
use crossbeam_channel::unbounded;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub const DEFAULT_MAX_WORKERS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

/// Successes and failures of one batch, each in completion order.
#[derive(Debug)]
pub struct BatchOutcome {
    pub results: Vec<DetectionResult>,
    pub failures: Vec<DetectionFailure>,
    pub summary: BatchSummary,
}

/// Applies a [`DocumentDetector`] to many files on a bounded worker pool.
///
/// Each file is detected in isolation: errors and panics become a
/// [`DetectionFailure`] for that file only. Outcomes are funnelled through a
/// channel to the calling thread, which is the only writer of the result sets.
pub struct BatchProcessor<X> {
    detector: DocumentDetector<X>,
    pool: ThreadPool,
    max_workers: usize,
}

impl<X: TextExtractor> BatchProcessor<X> {
    pub fn new(detector: DocumentDetector<X>, max_workers: usize) -> Result<Self, BatchError> {
        if max_workers == 0 {
            return Err(BatchError::NoWorkers);
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(max_workers)
            .thread_name(|i| format!("toc-worker-{i}"))
            .build()?;

        Ok(Self {
            detector,
            pool,
            max_workers,
        })
    }

    fn events(&self) -> &dyn EventSink {
        self.detector.events().as_ref()
    }

    /// Process every path, duplicates included. Returns once all files have
    /// either succeeded or failed.
    pub fn process(&self, paths: &[PathBuf]) -> BatchOutcome {
        let started = Instant::now();
        self.events().emit(&DetectionEvent::BatchStarted {
            files: paths.len(),
            max_workers: self.max_workers,
        });

        // Fan out one task per path
        let (tx, rx) = unbounded();
        let detector = &self.detector;
        self.pool.scope(|scope| {
            for path in paths {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    // the receiver lives until after the scope returns
                    let _ = tx.send(detect_isolated(detector, path));
                });
            }
        });
        drop(tx);

        // Collect outcomes in completion order
        let mut results = Vec::new();
        let mut failures = Vec::new();
        for outcome in rx {
            match outcome {
                Ok(result) => {
                    self.events()
                        .emit(&DetectionEvent::FileSucceeded { result: &result });
                    results.push(result);
                }
                Err(failure) => {
                    self.events()
                        .emit(&DetectionEvent::FileFailed { failure: &failure });
                    failures.push(failure);
                }
            }
        }

        let summary = BatchSummary {
            total: paths.len(),
            succeeded: results.len(),
            failed: failures.len(),
            elapsed: started.elapsed(),
        };
        self.events()
            .emit(&DetectionEvent::BatchFinished { summary: &summary });

        BatchOutcome {
            results,
            failures,
            summary,
        }
    }
}

fn detect_isolated<X: TextExtractor>(
    detector: &DocumentDetector<X>,
    path: &Path,
) -> Result<DetectionResult, DetectionFailure> {
    match panic::catch_unwind(AssertUnwindSafe(|| detector.detect(path))) {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(err)) => Err(DetectionFailure::from_error(&err)),
        Err(payload) => Err(DetectionFailure::internal(
            path,
            format!("detector panicked: {}", panic_message(payload.as_ref())),
        )),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic payload"
    }
}
