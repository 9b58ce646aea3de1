//! revsent-score library interface
//!
//! Exposes the run pipeline for the binary and for integration testing

pub mod error;
pub mod report;
pub mod services;
pub mod workflow;

pub use crate::error::{PipelineError, PipelineResult};
pub use crate::report::RunReport;
pub use crate::workflow::Pipeline;
