//! Command-line interface.

pub mod commands;
pub mod output;
pub mod types;

pub use output::progress::{create_spinner, ProgressBarExt};
pub use types::{Cli, Commands};

use console::style;
use serde_json::json;
use std::fmt::Write as _;

use crate::domain::errors::PipelineError;

/// What the process should do after a command failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub exit_code: i32,
    pub message: String,
    pub json: serde_json::Value,
}

/// Classify a command error for display.
///
/// An empty feedback collection is a notice, not a failure.
pub fn error_report(err: &anyhow::Error) -> ErrorReport {
    let pipeline = err.downcast_ref::<PipelineError>();

    if let Some(PipelineError::EmptyInput { location }) = pipeline {
        return ErrorReport {
            exit_code: 0,
            message: format!(
                "No feedback files found in {location}. Export feedback from the review tool first."
            ),
            json: json!({ "status": "no_feedback", "location": location }),
        };
    }

    // Pipeline errors already render their cause; other errors carry context chains.
    let mut message = match pipeline {
        Some(pipeline) => pipeline.to_string(),
        None => format!("{err:#}"),
    };
    let mut json = json!({ "status": "error", "error": message });

    if let Some(pipeline) = pipeline {
        json["stage"] = json!(pipeline.stage().as_str());
        if let PipelineError::ResponseParse {
            pattern_report: Some(path),
            ..
        } = pipeline
        {
            let _ = write!(message, "\nPattern report preserved at {}", path.display());
            json["pattern_report"] = json!(path);
        }
    }

    ErrorReport {
        exit_code: 1,
        message,
        json,
    }
}

/// Print `err` and exit with the matching status code.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    let report = error_report(&err);

    if json_mode {
        println!("{}", serde_json::to_string_pretty(&report.json).unwrap_or_default());
    } else if report.exit_code == 0 {
        eprintln!("{}", style(&report.message).yellow());
    } else {
        eprintln!("{} {}", style("Error:").red().bold(), report.message);
    }

    std::process::exit(report.exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{GenerationError, ResponseParseError};
    use std::path::PathBuf;

    #[test]
    fn test_empty_input_is_not_a_failure() {
        let err = anyhow::Error::new(PipelineError::EmptyInput {
            location: "./feedback".to_string(),
        });

        let report = error_report(&err);

        assert_eq!(report.exit_code, 0);
        assert!(report.message.contains("./feedback"));
        assert_eq!(report.json["status"], "no_feedback");
    }

    #[test]
    fn test_parse_failure_names_preserved_report() {
        let err = anyhow::Error::new(PipelineError::ResponseParse {
            source: ResponseParseError::MissingMarker {
                marker: "EXPECTED IMPACT:",
            },
            pattern_report: Some(PathBuf::from("out/pattern_analysis_r1.txt")),
        });

        let report = error_report(&err);

        assert_eq!(report.exit_code, 1);
        assert_eq!(report.json["stage"], "parse");
        assert_eq!(report.json["pattern_report"], "out/pattern_analysis_r1.txt");
        assert!(report.message.contains("Pattern report preserved at out/pattern_analysis_r1.txt"));
    }

    #[test]
    fn test_transport_failure_stage() {
        let err = anyhow::Error::new(PipelineError::from(GenerationError::Transport(
            "connection refused".to_string(),
        )));

        let report = error_report(&err);

        assert_eq!(report.exit_code, 1);
        assert_eq!(report.json["stage"], "generate");
        assert!(report.message.contains("connection refused"));
    }

    #[test]
    fn test_other_errors_have_no_stage() {
        let err = anyhow::anyhow!("Config file not found: x.yaml");

        let report = error_report(&err);

        assert_eq!(report.exit_code, 1);
        assert!(report.json.get("stage").is_none());
    }
}
