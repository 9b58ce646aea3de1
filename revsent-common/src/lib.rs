//! # revsent Common Library
//!
//! Shared code for the review sentiment pipeline including:
//! - Review record types and the line parser
//! - Lexicon and heuristic scorer
//! - Aggregation over the persisted result set
//! - SQLite persistence sink
//! - Configuration loading

pub mod aggregate;
pub mod config;
pub mod db;
pub mod error;
pub mod lexicon;
pub mod record;
pub mod scorer;
pub mod time;

pub use aggregate::{summarize, AggregateSummary};
pub use error::{Error, Result};
pub use lexicon::Lexicon;
pub use record::{ParseFailure, ReviewRecord, ScoredRecord, Sentiment};
