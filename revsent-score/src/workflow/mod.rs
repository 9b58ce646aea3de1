//! Run workflow: read, score in parallel, persist, summarize

pub mod pipeline;

pub use pipeline::{load_lexicon, run, write_summary_json, Pipeline};
