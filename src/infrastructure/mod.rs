//! Infrastructure layer module
//!
//! Adapters satisfying the domain ports, plus process-wide concerns:
//! - Feedback documents on disk
//! - Claude API client
//! - Artifact files
//! - Configuration management
//! - Logging infrastructure

pub mod artifacts;
pub mod claude;
pub mod config;
pub mod feedback;
pub mod logging;
