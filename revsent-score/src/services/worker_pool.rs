//! Fan-out/fan-in scoring pool
//!
//! The input is split into one contiguous partition per worker. Each worker
//! parses and scores its partition with no shared mutable state beyond two
//! relaxed counters; the caller blocks until every partition is done.
//! Lines that fail to parse are dropped from the result.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use revsent_common::record::{parse, ParseFailure, RawLine};
use revsent_common::scorer::score_record;
use revsent_common::{Lexicon, ScoredRecord};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Parse and score one line
pub fn process_line(lexicon: &Lexicon, line: &RawLine) -> Result<ScoredRecord, ParseFailure> {
    let review = parse(line)?;
    Ok(score_record(lexicon, review))
}

/// Fixed-size pool of scoring workers
pub struct WorkerPool {
    workers: usize,
    pool: ThreadPool,
}

impl WorkerPool {
    /// Create a pool with `workers` threads (at least one)
    pub fn new(workers: usize) -> Result<Self, rayon::ThreadPoolBuildError> {
        let workers = workers.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("revsent-worker-{}", i))
            .build()?;

        Ok(Self { workers, pool })
    }

    /// Pool sized to the host's available parallelism
    pub fn with_available_parallelism() -> Result<Self, rayon::ThreadPoolBuildError> {
        Self::new(revsent_common::config::default_workers())
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Parse and score every line, returning the successfully scored records
    ///
    /// Blocks until all lines are processed. Result order is not significant.
    pub fn process_all(&self, lines: &[RawLine], lexicon: &Lexicon) -> Vec<ScoredRecord> {
        if lines.is_empty() {
            return Vec::new();
        }

        let partition_len = lines.len().div_ceil(self.workers);
        let dropped = AtomicUsize::new(0);
        let processed = AtomicUsize::new(0);
        let started = Instant::now();

        tracing::debug!(
            "Fan-out: {} lines across {} workers ({} lines per partition)",
            lines.len(),
            self.workers,
            partition_len
        );

        let records: Vec<ScoredRecord> = self.pool.install(|| {
            lines
                .par_chunks(partition_len)
                .enumerate()
                .flat_map_iter(|(partition, chunk)| {
                    let dropped = &dropped;
                    let processed = &processed;
                    chunk.iter().enumerate().filter_map(move |(offset, line)| {
                        processed.fetch_add(1, Ordering::Relaxed);
                        match process_line(lexicon, line) {
                            Ok(record) => Some(record),
                            Err(e) => {
                                dropped.fetch_add(1, Ordering::Relaxed);
                                tracing::debug!(
                                    "Dropping line {}: {}",
                                    partition * partition_len + offset + 1,
                                    e
                                );
                                None
                            }
                        }
                    })
                })
                .collect()
        });

        tracing::info!(
            "Fan-in complete in {:?} | Processed: {} | Scored: {} | Dropped: {}",
            started.elapsed(),
            processed.load(Ordering::Relaxed),
            records.len(),
            dropped.load(Ordering::Relaxed)
        );

        records
    }
}
