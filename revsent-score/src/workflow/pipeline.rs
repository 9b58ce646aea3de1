//! Run Orchestrator
//!
//! One run, start to finish:
//! - **Phase 1**: Read source lines (missing source aborts before anything else)
//! - **Phase 2**: Fan out parse + score across the worker pool, wait for all
//! - **Phase 3**: Replace the stored result set (storage failure aborts the run)
//! - **Phase 4**: Read the stored set back and summarize it
//!
//! # Example
//! ```rust,ignore
//! let report = revsent_score::workflow::run(&config).await?;
//! println!("{}", report);
//! ```

use crate::error::PipelineResult;
use crate::report::RunReport;
use crate::services::{read_lines, WorkerPool};
use revsent_common::config::AppConfig;
use revsent_common::db::{init_database, ReviewSink, SqliteReviewStore};
use revsent_common::record::RawLine;
use revsent_common::{summarize, AggregateSummary, Lexicon, ScoredRecord};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Scoring pipeline bound to a worker pool and a lexicon
pub struct Pipeline {
    workers: Arc<WorkerPool>,
    lexicon: Arc<Lexicon>,
}

impl Pipeline {
    pub fn new(workers: usize, lexicon: Arc<Lexicon>) -> PipelineResult<Self> {
        Ok(Self {
            workers: Arc::new(WorkerPool::new(workers)?),
            lexicon,
        })
    }

    /// Score every line on the worker pool without blocking the async runtime
    pub async fn score_lines(&self, lines: Vec<RawLine>) -> PipelineResult<Vec<ScoredRecord>> {
        let workers = Arc::clone(&self.workers);
        let lexicon = Arc::clone(&self.lexicon);

        info!("Scoring {} lines with {} workers", lines.len(), workers.workers());
        let records =
            tokio::task::spawn_blocking(move || workers.process_all(&lines, &lexicon)).await?;

        Ok(records)
    }

    /// Score `lines`, replace the sink's contents, then summarize what was stored
    pub async fn run<S: ReviewSink>(
        &self,
        lines: Vec<RawLine>,
        sink: &S,
    ) -> PipelineResult<RunReport> {
        let started = Instant::now();
        let loaded = lines.len();

        let records = self.score_lines(lines).await?;
        let scored = records.len();

        let inserted = sink.replace_all(&records).await?;
        info!("Stored {} scored records", inserted);

        let summary = self.summarize_stored(sink).await?;

        Ok(RunReport {
            loaded,
            scored,
            inserted,
            summary,
            elapsed: started.elapsed(),
        })
    }

    /// Aggregate the sink's current contents
    pub async fn summarize_stored<S: ReviewSink>(
        &self,
        sink: &S,
    ) -> PipelineResult<AggregateSummary> {
        let stored = sink.read_all().await?;
        let summary = summarize(&stored, &self.lexicon);
        info!("Aggregated {} stored records", summary.total);
        Ok(summary)
    }
}

/// Load the configured lexicon, or the built-in one
pub fn load_lexicon(config: &AppConfig) -> PipelineResult<Lexicon> {
    match &config.lexicon_path {
        Some(path) => {
            info!("Lexicon: {}", path.display());
            Ok(Lexicon::from_toml_file(path)?)
        }
        None => Ok(Lexicon::default()),
    }
}

/// Execute one complete run against the configured input and database
pub async fn run(config: &AppConfig) -> PipelineResult<RunReport> {
    let started = Instant::now();

    let lexicon = Arc::new(load_lexicon(config)?);

    info!("Input: {}", config.input_path.display());
    let lines = read_lines(&config.input_path)?;
    info!("Loaded {} lines", lines.len());

    info!("Database: {}", config.database_path.display());
    let store = SqliteReviewStore::new(init_database(&config.database_path).await?);

    let pipeline = Pipeline::new(config.workers, lexicon)?;
    let outcome = pipeline.run(lines, &store).await;
    store.close().await;

    let mut report = outcome?;
    report.elapsed = started.elapsed();

    if let Some(path) = &config.summary_json {
        write_summary_json(path, &report.summary)?;
    }

    Ok(report)
}

/// Write the summary as pretty-printed JSON
pub fn write_summary_json(path: &Path, summary: &AggregateSummary) -> PipelineResult<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)?;
    info!("Summary written to {}", path.display());
    Ok(())
}
