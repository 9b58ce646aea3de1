//! Service modules for the scoring run
//!
//! - Line source: reads the review file into raw lines
//! - Worker pool: parallel parse + score over those lines

pub mod line_source;
pub mod worker_pool;

pub use line_source::read_lines;
pub use worker_pool::{process_line, WorkerPool};
