//! Fork-join fan-out of the pipeline over a list of files.
//!
//! The index range `[0, n)` is bisected until a piece holds at most
//! `split_threshold` files. Leaves run their files one after another; sibling
//! halves run concurrently on a rayon pool and the parent returns once both
//! children have finished.

use std::{ops::Range, path::PathBuf};

use tracing::{info, warn};

use crate::{error::Result, pipeline::Pipeline, types::BatchReport};

/// Largest range processed without further splitting.
pub const DEFAULT_SPLIT_THRESHOLD: usize = 8;

/// Run `leaf` over every piece of `range` no longer than `leaf_size`, splitting
/// at the midpoint and joining both halves with `merge`.
///
/// Must be called from inside a rayon pool to run in parallel; elsewhere it
/// uses rayon's global pool.
pub fn fork_join<T, L, M>(range: Range<usize>, leaf_size: usize, leaf: &L, merge: &M) -> T
where
    T: Send,
    L: Fn(Range<usize>) -> T + Sync,
    M: Fn(T, T) -> T + Sync,
{
    let leaf_size = leaf_size.max(1);
    if range.len() <= leaf_size {
        return leaf(range);
    }

    let mid = range.start + (range.end - range.start) / 2;
    let (left, right) = rayon::join(
        || fork_join(range.start..mid, leaf_size, leaf, merge),
        || fork_join(mid..range.end, leaf_size, leaf, merge),
    );
    merge(left, right)
}

/// Removes the background of every file in a batch.
pub struct BatchPartitioner {
    pipeline: Pipeline,
    split_threshold: usize,
    threads: Option<usize>,
}

impl BatchPartitioner {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            split_threshold: DEFAULT_SPLIT_THRESHOLD,
            threads: None,
        }
    }

    pub fn with_split_threshold(mut self, split_threshold: usize) -> Self {
        self.split_threshold = split_threshold.max(1);
        self
    }

    /// Worker count; `None` lets rayon pick one per core.
    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    /// Process all files, blocking until every one is done or skipped.
    ///
    /// Per-file failures are logged and counted, never returned.
    pub fn run(&self, files: &[PathBuf]) -> Result<BatchReport> {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(threads) = self.threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build()?;

        info!(
            files = files.len(),
            split_threshold = self.split_threshold,
            threads = pool.current_num_threads(),
            "starting batch"
        );

        let report = pool.install(|| {
            fork_join(
                0..files.len(),
                self.split_threshold,
                &|range: Range<usize>| self.process_range(&files[range]),
                &BatchReport::merge,
            )
        });

        info!(
            processed = report.processed,
            written = report.written,
            skipped = report.skipped,
            "batch finished"
        );
        Ok(report)
    }

    fn process_range(&self, files: &[PathBuf]) -> BatchReport {
        let mut report = BatchReport::default();
        for path in files {
            report.processed += 1;
            match self.pipeline.process_file(path) {
                Ok(written) => {
                    report.written += 1;
                    info!(input = %path.display(), output = %written.display(), "background removed");
                }
                Err(err) => {
                    report.skipped += 1;
                    warn!(input = %path.display(), error = %err, "skipping file");
                }
            }
        }
        report
    }
}
