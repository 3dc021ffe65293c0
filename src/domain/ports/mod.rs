//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces that infrastructure adapters implement:
//! - FeedbackSource: reading stored feedback records
//! - TextGenerator: the external text-generation service
//! - RewriteResponseParser: decomposing a rewrite reply
//! - ArtifactStore: write-once persistence of run artifacts
//!
//! These traits keep the pipeline independent of files, HTTP and reply formats.

pub mod artifact_store;
pub mod errors;
pub mod feedback_source;
pub mod response_parser;
pub mod text_generator;

pub use artifact_store::{ArtifactKind, ArtifactStore};
pub use errors::{ArtifactStoreError, FeedbackSourceError, GenerationError, ResponseParseError};
pub use feedback_source::FeedbackSource;
pub use response_parser::RewriteResponseParser;
pub use text_generator::TextGenerator;
