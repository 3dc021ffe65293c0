//! Domain layer for the memo improvement pipeline
//!
//! This module contains the feedback data model, the aggregate statistics
//! built from it, and the ports the pipeline talks to.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{PipelineError, PipelineResult, PipelineStage};
