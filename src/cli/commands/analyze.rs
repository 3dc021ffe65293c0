//! Implementation of the `dealmemo analyze` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use super::{dir_or, run_id_or_now};
use crate::cli::output::{output, CommandOutput};
use crate::domain::errors::PipelineError;
use crate::domain::models::{Config, PatternAnalysis};
use crate::domain::ports::{ArtifactKind, ArtifactStore};
use crate::infrastructure::artifacts::FileArtifactStore;
use crate::infrastructure::feedback::FeedbackDirectoryLoader;
use crate::services::{analyze_source, PatternAggregator, ReportRenderer};

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Directory holding feedback documents
    #[arg(long)]
    pub feedback_dir: Option<PathBuf>,

    /// Also write the report to the output directory
    #[arg(long)]
    pub save: bool,

    /// Output directory for --save
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Run identifier used in artifact file names (defaults to a timestamp)
    #[arg(long)]
    pub run_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeOutput {
    pub analysis: PatternAnalysis,
    #[serde(skip)]
    pub report: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<PathBuf>,
}

impl CommandOutput for AnalyzeOutput {
    fn to_human(&self) -> String {
        match &self.saved {
            Some(path) => format!("{}\n\nPattern report saved to {}", self.report, path.display()),
            None => self.report.clone(),
        }
    }
}

pub async fn execute(args: AnalyzeArgs, config: &Config, json_mode: bool) -> Result<()> {
    let source = FeedbackDirectoryLoader::new(
        dir_or(args.feedback_dir, &config.feedback.dir),
        config.feedback.file_prefix.clone(),
    );
    let analysis = analyze_source(&source, &PatternAggregator::from_config(&config.analysis)).await?;
    let report = ReportRenderer::new(config.analysis.max_problematic_sections).pattern_report(&analysis);

    let saved = if args.save {
        let store = FileArtifactStore::new(dir_or(args.output_dir, &config.output.dir));
        let run_id = run_id_or_now(args.run_id);
        Some(
            store
                .save(&ArtifactKind::PatternReport, &run_id, &report)
                .await
                .map_err(PipelineError::from)?,
        )
    } else {
        None
    };

    output(
        &AnalyzeOutput {
            analysis,
            report,
            saved,
        },
        json_mode,
    );
    Ok(())
}
