//! Domain errors for the prompt improvement pipeline.

use std::path::PathBuf;
use thiserror::Error;

use super::ports::{ArtifactStoreError, FeedbackSourceError, GenerationError, ResponseParseError};

/// Pipeline stage an error originated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Load,
    Generate,
    Parse,
    Persist,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Generate => "generate",
            Self::Parse => "parse",
            Self::Persist => "persist",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that end a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Nothing to analyze. Callers report this and stop without failing.
    #[error("No feedback records found in {location}")]
    EmptyInput { location: String },

    #[error("Malformed feedback record {source_id}: {reason}")]
    MalformedRecord { source_id: String, reason: String },

    #[error("Failed to read feedback from {location}: {source}")]
    FeedbackUnreadable {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Text generation service failed: {0}")]
    ServiceTransport(#[source] GenerationError),

    /// The pattern report was still saved when `pattern_report` is set.
    #[error("Rewrite response malformed: {source}")]
    ResponseParse {
        #[source]
        source: ResponseParseError,
        pattern_report: Option<PathBuf>,
    },

    #[error("Failed to persist artifacts: {0}")]
    Persistence(#[from] ArtifactStoreError),
}

impl PipelineError {
    pub fn stage(&self) -> PipelineStage {
        match self {
            Self::EmptyInput { .. } | Self::MalformedRecord { .. } | Self::FeedbackUnreadable { .. } => {
                PipelineStage::Load
            }
            Self::ServiceTransport(_) => PipelineStage::Generate,
            Self::ResponseParse { .. } => PipelineStage::Parse,
            Self::Persistence(_) => PipelineStage::Persist,
        }
    }

    /// Whether the run ended because there was nothing to do.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, Self::EmptyInput { .. })
    }
}

impl From<FeedbackSourceError> for PipelineError {
    fn from(err: FeedbackSourceError) -> Self {
        match err {
            FeedbackSourceError::Unreadable { location, source } => {
                Self::FeedbackUnreadable { location, source }
            }
            FeedbackSourceError::Malformed { source_id, reason } => {
                Self::MalformedRecord { source_id, reason }
            }
        }
    }
}

impl From<GenerationError> for PipelineError {
    fn from(err: GenerationError) -> Self {
        Self::ServiceTransport(err)
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_mapping() {
        let err = PipelineError::EmptyInput {
            location: "./feedback".to_string(),
        };
        assert_eq!(err.stage(), PipelineStage::Load);
        assert!(err.is_empty_input());

        let err: PipelineError = GenerationError::EmptyResponse.into();
        assert_eq!(err.stage(), PipelineStage::Generate);

        let err = PipelineError::ResponseParse {
            source: ResponseParseError::MissingMarker {
                marker: "EXPECTED IMPACT:",
            },
            pattern_report: None,
        };
        assert_eq!(err.stage(), PipelineStage::Parse);
        assert!(!err.is_empty_input());
    }

    #[test]
    fn test_malformed_source_error_keeps_identifier() {
        let err: PipelineError = FeedbackSourceError::Malformed {
            source_id: "feedback_001.json".to_string(),
            reason: "expected object".to_string(),
        }
        .into();

        assert!(matches!(err, PipelineError::MalformedRecord { .. }));
        assert!(err.to_string().contains("feedback_001.json"));
    }
}
