//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::analyze::AnalyzeArgs;
use super::commands::generate::GenerateArgs;
use super::commands::improve::ImproveArgs;
use super::commands::init::InitArgs;

#[derive(Parser, Debug)]
#[command(name = "dealmemo")]
#[command(about = "Investment memo generator with feedback-driven prompt improvement", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (replaces .dealmemo/config.yaml and local.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default configuration to .dealmemo/config.yaml
    Init(InitArgs),

    /// Aggregate stored feedback and print the pattern report
    Analyze(AnalyzeArgs),

    /// Rewrite the memo prompt from stored feedback
    Improve(ImproveArgs),

    /// Generate an investment memo for a company
    Generate(GenerateArgs),
}
