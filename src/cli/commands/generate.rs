//! Implementation of the `dealmemo generate` command.

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use console::style;
use serde::Serialize;
use std::path::PathBuf;

use super::{claude_generator, dir_or, read_prompt, run_id_or_now};
use crate::cli::output::progress::{create_spinner, ProgressBarExt};
use crate::cli::output::{output, CommandOutput};
use crate::domain::errors::PipelineError;
use crate::domain::models::Config;
use crate::domain::ports::{ArtifactKind, ArtifactStore};
use crate::infrastructure::artifacts::FileArtifactStore;
use crate::services::{memo_document, normalize_url, CompanyProfile, MemoGenerator};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Company website URL
    #[arg(long)]
    pub url: String,

    /// File holding the company's website text
    #[arg(long)]
    pub content_file: PathBuf,

    /// Company name
    #[arg(long)]
    pub title: Option<String>,

    /// Short company description
    #[arg(long)]
    pub description: Option<String>,

    /// Memo prompt template (defaults to the built-in prompt)
    #[arg(long)]
    pub prompt_file: Option<PathBuf>,

    /// Directory the memo is written to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Run identifier used in the file name (defaults to a timestamp)
    #[arg(long)]
    pub run_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateOutput {
    pub url: String,
    pub path: PathBuf,
}

impl CommandOutput for GenerateOutput {
    fn to_human(&self) -> String {
        format!(
            "{}\nSaved to: {}",
            style("Deal memo generated successfully!").green().bold(),
            self.path.display()
        )
    }
}

pub async fn execute(args: GenerateArgs, config: &Config, json_mode: bool) -> Result<()> {
    let website_content = tokio::fs::read_to_string(&args.content_file)
        .await
        .with_context(|| format!("Failed to read website content from {}", args.content_file.display()))?;
    let template = read_prompt(args.prompt_file.as_deref()).await?;

    let company = CompanyProfile {
        url: normalize_url(&args.url),
        name: args.title,
        description: args.description,
        website_content,
    };
    let generator = MemoGenerator::new(claude_generator(config, config.claude.memo_max_tokens)?, template);

    let store = FileArtifactStore::new(dir_or(args.output_dir, &config.output.dir));
    let run_id = run_id_or_now(args.run_id);
    let kind = ArtifactKind::Memo {
        slug: company.slug(),
    };
    store
        .ensure_absent(std::slice::from_ref(&kind), &run_id)
        .await
        .map_err(PipelineError::from)?;

    let spinner = create_spinner(format!("Generating investment memo for {}...", company.url), !json_mode);
    let memo = match generator.generate(&company).await {
        Ok(memo) => {
            spinner.finish_success("Memo generated");
            memo
        }
        Err(err) => {
            spinner.finish_error("Memo generation failed");
            return Err(PipelineError::from(err).into());
        }
    };

    let path = store
        .save(&kind, &run_id, &memo_document(&company.url, &memo, Local::now()))
        .await
        .map_err(PipelineError::from)?;

    output(
        &GenerateOutput {
            url: company.url,
            path,
        },
        json_mode,
    );
    Ok(())
}
