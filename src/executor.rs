//! Deletion execution
//!
//! Issues one recursive delete per planned path and tallies the outcomes.
//! Per-path HTTP failures are counted and the run carries on; a failure to
//! reach the API stops everything, leaving already issued deletes in place.
//!
//! Planned paths never contain one another, so they can be deleted in any
//! order. With more than one worker, scoped threads pull the next index from
//! a shared counter until the plan is drained or a worker hits a fatal error.

use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tracing::{error, info, warn};

use crate::api::{DeleteOutcome, TargetApi};
use crate::error::{ReclaimError, Result};

/// Outcome counts for a deletion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteSummary {
    pub deleted: usize,
    pub already_absent: usize,
    pub failed: usize,
}

impl DeleteSummary {
    pub fn total(&self) -> usize {
        self.deleted + self.already_absent + self.failed
    }
}

#[derive(Default)]
struct Counters {
    deleted: AtomicUsize,
    already_absent: AtomicUsize,
    failed: AtomicUsize,
    completed: AtomicUsize,
}

impl Counters {
    /// Count an outcome, returning its 1-based completion number
    fn record(&self, outcome: DeleteOutcome) -> usize {
        let counter = match outcome {
            DeleteOutcome::Deleted => &self.deleted,
            DeleteOutcome::AlreadyAbsent => &self.already_absent,
            DeleteOutcome::Failed { .. } => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.completed.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn summary(&self) -> DeleteSummary {
        DeleteSummary {
            deleted: self.deleted.load(Ordering::Relaxed),
            already_absent: self.already_absent.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Runs a deletion plan against a target filesystem
pub struct Executor<'a, A: TargetApi + ?Sized> {
    api: &'a A,
    filesystem: &'a str,
    workers: NonZeroUsize,
}

impl<'a, A: TargetApi + ?Sized> Executor<'a, A> {
    /// Sequential executor, one request in flight
    pub fn new(api: &'a A, filesystem: &'a str) -> Self {
        Self {
            api,
            filesystem,
            workers: NonZeroUsize::MIN,
        }
    }

    pub fn with_workers(mut self, workers: NonZeroUsize) -> Self {
        self.workers = workers;
        self
    }

    /// Delete every path in `paths`
    pub fn run(&self, paths: &[String]) -> Result<DeleteSummary> {
        let counters = Counters::default();

        let result = if self.workers.get() == 1 || paths.len() < 2 {
            self.run_sequential(paths, &counters)
        } else {
            self.run_concurrent(paths, &counters)
        };

        let summary = counters.summary();
        if result.is_err() {
            warn!(
                "Aborted after {} of {} paths; completed deletions are not rolled back",
                summary.total(),
                paths.len()
            );
        }
        result.map(|()| summary)
    }

    fn run_sequential(&self, paths: &[String], counters: &Counters) -> Result<()> {
        for path in paths {
            let outcome = self.api.delete_by_path(self.filesystem, path)?;
            let n = counters.record(outcome);
            log_outcome(n, paths.len(), path, outcome);
        }
        Ok(())
    }

    fn run_concurrent(&self, paths: &[String], counters: &Counters) -> Result<()> {
        let next = AtomicUsize::new(0);
        let abort = AtomicBool::new(false);
        let fatal: Mutex<Option<ReclaimError>> = Mutex::new(None);
        let workers = self.workers.get().min(paths.len());

        std::thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| {
                    while !abort.load(Ordering::Acquire) {
                        let idx = next.fetch_add(1, Ordering::Relaxed);
                        let Some(path) = paths.get(idx) else {
                            break;
                        };

                        match self.api.delete_by_path(self.filesystem, path) {
                            Ok(outcome) => {
                                let n = counters.record(outcome);
                                log_outcome(n, paths.len(), path, outcome);
                            }
                            Err(e) => {
                                abort.store(true, Ordering::Release);
                                let mut slot = fatal
                                    .lock()
                                    .unwrap_or_else(std::sync::PoisonError::into_inner);
                                if slot.is_none() {
                                    *slot = Some(e);
                                }
                                break;
                            }
                        }
                    }
                });
            }
        });

        match fatal
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
        {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn log_outcome(n: usize, total: usize, path: &str, outcome: DeleteOutcome) {
    match outcome {
        DeleteOutcome::Deleted => info!("{}/{}, Deleted {}", n, total, path),
        DeleteOutcome::AlreadyAbsent => info!("{}/{}, Missing on Target {}", n, total, path),
        DeleteOutcome::Failed { status } => {
            error!("{}/{}, Error deleting {}: {}", n, total, path, status);
        }
    }
}
