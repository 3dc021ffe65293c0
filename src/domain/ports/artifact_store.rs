use async_trait::async_trait;
use std::path::PathBuf;

use super::errors::ArtifactStoreError;

/// Kinds of artifact a run produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Plain-text pattern analysis report
    PatternReport,
    /// Markdown before/after comparison
    ComparisonReport,
    /// Rewritten prompt on its own
    ImprovedPrompt,
    /// JSON record of the analysis and artifact
    ImprovementData,
    /// Generated investment memo for the company identified by `slug`
    Memo { slug: String },
}

impl ArtifactKind {
    /// Artifacts written by one improvement run
    pub const IMPROVEMENT_RUN: [ArtifactKind; 4] = [
        Self::PatternReport,
        Self::ComparisonReport,
        Self::ImprovedPrompt,
        Self::ImprovementData,
    ];

    /// File name for this artifact in run `run_id`
    pub fn file_name(&self, run_id: &str) -> String {
        match self {
            Self::PatternReport => format!("pattern_analysis_{run_id}.txt"),
            Self::ComparisonReport => format!("prompt_improvement_{run_id}.md"),
            Self::ImprovedPrompt => format!("improved_prompt_{run_id}.txt"),
            Self::ImprovementData => format!("improvement_data_{run_id}.json"),
            Self::Memo { slug } => format!("deal_memo_{slug}_{run_id}.md"),
        }
    }
}

/// Port for persisting run artifacts
///
/// Every artifact is written exactly once: saving over an existing artifact
/// fails with [`ArtifactStoreError::AlreadyExists`] instead of replacing it.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persist `contents` as a new artifact and return where it was written
    async fn save(
        &self,
        kind: &ArtifactKind,
        run_id: &str,
        contents: &str,
    ) -> Result<PathBuf, ArtifactStoreError>;

    /// Read back a previously saved artifact
    async fn load(&self, kind: &ArtifactKind, run_id: &str) -> Result<String, ArtifactStoreError>;

    /// Whether the artifact exists
    async fn exists(&self, kind: &ArtifactKind, run_id: &str) -> bool;

    /// Where the artifact is (or would be) stored
    fn location(&self, kind: &ArtifactKind, run_id: &str) -> PathBuf;

    /// Fail with [`ArtifactStoreError::AlreadyExists`] if any of `kinds`
    /// already exists for `run_id`
    async fn ensure_absent(
        &self,
        kinds: &[ArtifactKind],
        run_id: &str,
    ) -> Result<(), ArtifactStoreError> {
        for kind in kinds {
            if self.exists(kind, run_id).await {
                return Err(ArtifactStoreError::AlreadyExists(self.location(kind, run_id)));
            }
        }
        Ok(())
    }
}
