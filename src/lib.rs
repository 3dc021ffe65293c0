//! dealmemo - investment memo generation with feedback-driven prompt improvement
//!
//! Human reviewers rate each section of generated memos and suggest
//! corrections. dealmemo aggregates those reviews into per-section statistics,
//! asks a text-generation service to rewrite the memo prompt against the
//! weakest sections, and records the result as durable artifacts.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): feedback models, analysis results and ports
//! - **Service Layer** (`services`): aggregation, request composition, parsing,
//!   rendering and the improvement pipeline
//! - **Infrastructure Layer** (`infrastructure`): feedback files, Claude API,
//!   artifact files, configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use dealmemo::infrastructure::feedback::FeedbackDirectoryLoader;
//! use dealmemo::services::{analyze_source, PatternAggregator, ReportRenderer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let source = FeedbackDirectoryLoader::new("feedback", "feedback_");
//!     let analysis = analyze_source(&source, &PatternAggregator::default()).await?;
//!     println!("{}", ReportRenderer::default().pattern_report(&analysis));
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Config, FeedbackRecord, ImprovementArtifact, PatternAnalysis, Rating, SectionFeedback,
};
pub use domain::ports::{ArtifactStore, FeedbackSource, RewriteResponseParser, TextGenerator};
pub use domain::{PipelineError, PipelineResult, PipelineStage};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{ImprovementPipeline, PatternAggregator};
