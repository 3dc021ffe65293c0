use std::path::PathBuf;
use thiserror::Error;

/// Feedback source errors
#[derive(Debug, Error)]
pub enum FeedbackSourceError {
    #[error("Failed to read feedback from {location}: {source}")]
    Unreadable {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed feedback record {source_id}: {reason}")]
    Malformed { source_id: String, reason: String },
}

/// Text generation service errors
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Text generation service not configured: {0}")]
    NotConfigured(String),

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Service rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Service returned no text")]
    EmptyResponse,
}

/// Rewrite response parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseParseError {
    #[error("missing marker \"{marker}\"")]
    MissingMarker { marker: &'static str },

    #[error("segment after \"{marker}\" is empty")]
    EmptySegment { marker: &'static str },
}

/// Artifact persistence errors
#[derive(Debug, Error)]
pub enum ArtifactStoreError {
    #[error("Artifact already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
