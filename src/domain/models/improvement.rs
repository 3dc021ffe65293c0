//! Prompt rewrite request and the resulting improvement artifact.

use serde::{Deserialize, Serialize};

use super::analysis::{PatternAnalysis, ProblematicSection};

/// Corrections sampled for one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionCorrections {
    pub section: String,
    pub corrections: Vec<String>,
}

/// Payload asking the text-generation service for an improved prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewriteRequest {
    pub total_records: usize,
    /// Average quality score, `0.0` when no scores were given
    pub average_quality_score: f64,
    pub original_prompt: String,
    pub problematic_sections: Vec<ProblematicSection>,
    pub corrections: Vec<SectionCorrections>,
}

/// The three parts of a rewrite reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteResponse {
    pub improved_prompt: String,
    pub improvements: Vec<String>,
    pub expected_impact: String,
}

/// Durable before/after record of one prompt rewrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementArtifact {
    pub original_prompt: String,
    pub improved_prompt: String,
    pub improvements: Vec<String>,
    pub expected_impact: String,
    pub analysis: PatternAnalysis,
}

impl ImprovementArtifact {
    pub fn new(original_prompt: String, response: RewriteResponse, analysis: PatternAnalysis) -> Self {
        Self {
            original_prompt,
            improved_prompt: response.improved_prompt,
            improvements: response.improvements,
            expected_impact: response.expected_impact,
            analysis,
        }
    }
}

/// Machine-readable record persisted for each improvement run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImprovementRecord {
    pub run_id: String,
    pub generated_at: chrono::DateTime<chrono::Local>,
    #[serde(flatten)]
    pub artifact: ImprovementArtifact,
}
