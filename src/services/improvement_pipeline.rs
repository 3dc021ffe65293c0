//! Feedback-driven prompt improvement pipeline.
//!
//! load → aggregate → corpus → compose → generate → parse → render → persist.
//! Stages run strictly one after another; the text-generation call is the
//! only suspension point.

use chrono::Local;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::{
    AnalysisConfig, ImprovementArtifact, ImprovementRecord, PatternAnalysis,
};
use crate::domain::ports::{
    ArtifactKind, ArtifactStore, FeedbackSource, RewriteResponseParser, TextGenerator,
};
use crate::services::{CorrectionCorpus, PatternAggregator, ReportRenderer, RequestComposer};

/// Where a successful run wrote its artifacts.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SavedArtifacts {
    pub pattern_report: PathBuf,
    pub comparison_report: PathBuf,
    pub improved_prompt: PathBuf,
    pub improvement_data: PathBuf,
}

/// Result of a successful improvement run.
#[derive(Debug, Clone)]
pub struct ImprovementOutcome {
    pub run_id: String,
    pub artifact: ImprovementArtifact,
    pub saved: SavedArtifacts,
}

/// Load every record from `source` and aggregate it.
///
/// An empty collection is reported as [`PipelineError::EmptyInput`].
#[instrument(skip_all, fields(location = %source.location()))]
pub async fn analyze_source(
    source: &dyn FeedbackSource,
    aggregator: &PatternAggregator,
) -> PipelineResult<PatternAnalysis> {
    let records = source.load().await?;
    if records.is_empty() {
        warn!("no feedback records found");
        return Err(PipelineError::EmptyInput {
            location: source.location(),
        });
    }

    info!(records = records.len(), "loaded feedback records");
    Ok(aggregator.aggregate(&records))
}

/// Orchestrates one improvement run over injected ports.
pub struct ImprovementPipeline {
    source: Arc<dyn FeedbackSource>,
    generator: Arc<dyn TextGenerator>,
    parser: Arc<dyn RewriteResponseParser>,
    store: Arc<dyn ArtifactStore>,
    aggregator: PatternAggregator,
    composer: RequestComposer,
    renderer: ReportRenderer,
}

impl ImprovementPipeline {
    pub fn new(
        source: Arc<dyn FeedbackSource>,
        generator: Arc<dyn TextGenerator>,
        parser: Arc<dyn RewriteResponseParser>,
        store: Arc<dyn ArtifactStore>,
        limits: AnalysisConfig,
    ) -> Self {
        Self {
            source,
            generator,
            parser,
            store,
            aggregator: PatternAggregator::from_config(&limits),
            renderer: ReportRenderer::new(limits.max_problematic_sections),
            composer: RequestComposer::new(limits),
        }
    }

    pub fn renderer(&self) -> &ReportRenderer {
        &self.renderer
    }

    /// Load and aggregate the configured feedback source.
    pub async fn analyze(&self) -> PipelineResult<PatternAnalysis> {
        analyze_source(self.source.as_ref(), &self.aggregator).await
    }

    /// Persist the pattern report alone.
    pub async fn save_pattern_report(
        &self,
        analysis: &PatternAnalysis,
        run_id: &str,
    ) -> PipelineResult<PathBuf> {
        let report = self.renderer.pattern_report(analysis);
        Ok(self
            .store
            .save(&ArtifactKind::PatternReport, run_id, &report)
            .await?)
    }

    /// Rewrite `original_prompt` from an existing analysis and persist every artifact.
    ///
    /// Fails before contacting the service if any artifact of `run_id`
    /// already exists. Nothing is written if the service call fails. If the
    /// reply cannot be parsed only the pattern report is written.
    #[instrument(skip(self, analysis, original_prompt), fields(run_id = %run_id))]
    pub async fn improve(
        &self,
        analysis: PatternAnalysis,
        original_prompt: &str,
        run_id: &str,
    ) -> PipelineResult<ImprovementOutcome> {
        self.store
            .ensure_absent(&ArtifactKind::IMPROVEMENT_RUN, run_id)
            .await
            .inspect_err(|err| error!(error = %err, "run id already used"))?;

        let corpus = CorrectionCorpus::build(&analysis);
        let request = self.composer.compose(&analysis, &corpus, original_prompt);
        let prompt = RequestComposer::render_prompt(&request, &self.parser.format_instructions());

        info!(
            problematic = request.problematic_sections.len(),
            correction_sections = request.corrections.len(),
            prompt_chars = prompt.len(),
            "requesting prompt rewrite"
        );

        let reply = self.generator.generate(&prompt).await.map_err(|err| {
            error!(error = %err, "prompt rewrite request failed");
            PipelineError::from(err)
        })?;

        let response = match self.parser.parse(&reply) {
            Ok(response) => response,
            Err(source) => {
                error!(error = %source, "rewrite response malformed");
                let pattern_report = match self.save_pattern_report(&analysis, run_id).await {
                    Ok(path) => Some(path),
                    Err(err) => {
                        warn!(error = %err, "could not preserve pattern report");
                        None
                    }
                };
                return Err(PipelineError::ResponseParse {
                    source,
                    pattern_report,
                });
            }
        };

        let generated_at = Local::now();
        let artifact = ImprovementArtifact::new(original_prompt.to_string(), response, analysis);
        let record = ImprovementRecord {
            run_id: run_id.to_string(),
            generated_at,
            artifact,
        };

        let pattern_report = self.renderer.pattern_report(&record.artifact.analysis);
        let comparison = self.renderer.comparison_report(&record.artifact, generated_at);
        let data = ReportRenderer::record_json(&record)
            .map_err(|err| PipelineError::Persistence(err.into()))?;

        let saved = SavedArtifacts {
            pattern_report: self
                .store
                .save(&ArtifactKind::PatternReport, run_id, &pattern_report)
                .await?,
            comparison_report: self
                .store
                .save(&ArtifactKind::ComparisonReport, run_id, &comparison)
                .await?,
            improved_prompt: self
                .store
                .save(&ArtifactKind::ImprovedPrompt, run_id, &record.artifact.improved_prompt)
                .await?,
            improvement_data: self
                .store
                .save(&ArtifactKind::ImprovementData, run_id, &data)
                .await?,
        };

        info!(improvements = record.artifact.improvements.len(), "improvement artifacts saved");

        Ok(ImprovementOutcome {
            run_id: record.run_id,
            artifact: record.artifact,
            saved,
        })
    }

    /// Full run: analyze, then improve.
    pub async fn run(&self, original_prompt: &str, run_id: &str) -> PipelineResult<ImprovementOutcome> {
        let analysis = self.analyze().await?;
        self.improve(analysis, original_prompt, run_id).await
    }
}
