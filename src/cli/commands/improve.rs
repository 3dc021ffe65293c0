//! Implementation of the `dealmemo improve` command.

use anyhow::Result;
use clap::Args;
use console::style;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use super::{claude_generator, dir_or, read_prompt, run_id_or_now};
use crate::cli::output::progress::{create_spinner, ProgressBarExt};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::artifacts::FileArtifactStore;
use crate::infrastructure::feedback::FeedbackDirectoryLoader;
use crate::services::{ImprovementOutcome, ImprovementPipeline, MarkerResponseParser, SavedArtifacts};

#[derive(Args, Debug)]
pub struct ImproveArgs {
    /// Directory holding feedback documents
    #[arg(long)]
    pub feedback_dir: Option<PathBuf>,

    /// Prompt to improve (defaults to the built-in memo prompt)
    #[arg(long)]
    pub prompt_file: Option<PathBuf>,

    /// Directory artifacts are written to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Run identifier used in artifact file names (defaults to a timestamp)
    #[arg(long)]
    pub run_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImproveOutput {
    pub run_id: String,
    pub records_analyzed: usize,
    pub problematic_sections: usize,
    pub improvements: Vec<String>,
    pub expected_impact: String,
    pub saved: SavedArtifacts,
}

impl From<ImprovementOutcome> for ImproveOutput {
    fn from(outcome: ImprovementOutcome) -> Self {
        Self {
            run_id: outcome.run_id,
            records_analyzed: outcome.artifact.analysis.total_records,
            problematic_sections: outcome.artifact.analysis.problematic_sections.len(),
            improvements: outcome.artifact.improvements,
            expected_impact: outcome.artifact.expected_impact,
            saved: outcome.saved,
        }
    }
}

impl CommandOutput for ImproveOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("{}", style("Improvement analysis complete!").green().bold()),
            String::new(),
            "Generated files:".to_string(),
            format!("  - Pattern Analysis: {}", self.saved.pattern_report.display()),
            format!("  - Comparison Report: {}", self.saved.comparison_report.display()),
            format!("  - Improved Prompt: {}", self.saved.improved_prompt.display()),
            format!("  - JSON Data: {}", self.saved.improvement_data.display()),
            String::new(),
            format!("{}", style("KEY IMPROVEMENTS PREVIEW:").cyan().bold()),
        ];
        for (n, improvement) in self.improvements.iter().enumerate() {
            lines.push(format!("  {}. {improvement}", n + 1));
        }
        lines.join("\n")
    }
}

pub async fn execute(args: ImproveArgs, config: &Config, json_mode: bool) -> Result<()> {
    let original_prompt = read_prompt(args.prompt_file.as_deref()).await?;
    let run_id = run_id_or_now(args.run_id);

    let pipeline = ImprovementPipeline::new(
        Arc::new(FeedbackDirectoryLoader::new(
            dir_or(args.feedback_dir, &config.feedback.dir),
            config.feedback.file_prefix.clone(),
        )),
        claude_generator(config, config.claude.rewrite_max_tokens)?,
        Arc::new(MarkerResponseParser::new()),
        Arc::new(FileArtifactStore::new(dir_or(args.output_dir, &config.output.dir))),
        config.analysis.clone(),
    );

    let analysis = pipeline.analyze().await?;
    if !json_mode {
        println!("{}\n", pipeline.renderer().pattern_report(&analysis));
    }

    let spinner = create_spinner("Generating improved prompt...", !json_mode);
    let outcome = match pipeline.improve(analysis, &original_prompt, &run_id).await {
        Ok(outcome) => {
            spinner.finish_success("Improved prompt generated");
            outcome
        }
        Err(err) => {
            spinner.finish_error("Prompt improvement failed");
            return Err(err.into());
        }
    };

    output(&ImproveOutput::from(outcome), json_mode);
    Ok(())
}
