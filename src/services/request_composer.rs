//! Rewrite request composition.
//!
//! Turns an analysis, its correction corpus and the current prompt into a
//! [`RewriteRequest`], and renders that request as the prompt text sent to the
//! text-generation service. Nothing here performs I/O.

use std::fmt::Write as _;

use crate::domain::models::{section_display_name, AnalysisConfig, PatternAnalysis, RewriteRequest};
use crate::services::CorrectionCorpus;

const REWRITE_GUIDELINES: &str = "\
TASK:
Produce an improved version of the prompt that fixes the issues above:

1. For each problematic section, add instructions that prevent the reported problems
2. Show what strong output looks like for the weakest sections
3. Require sourced, quantitative backing for claims
4. Forbid generic filler and ask for specific insight
5. Keep the result an actionable investment memo, not a research report

Requirements for the improved prompt:
- Keep the same overall structure and sections
- Add 2-3 concrete instructions per problematic section
- Include measurable quality checkpoints (e.g. \"include at least 3 sourced data points\")
- Contrast good and bad output for the worst sections
- Make every instruction actionable";

/// Builds rewrite requests within the configured size limits.
#[derive(Debug, Clone, Default)]
pub struct RequestComposer {
    limits: AnalysisConfig,
}

impl RequestComposer {
    pub fn new(limits: AnalysisConfig) -> Self {
        Self { limits }
    }

    pub fn compose(
        &self,
        analysis: &PatternAnalysis,
        corpus: &CorrectionCorpus,
        original_prompt: &str,
    ) -> RewriteRequest {
        RewriteRequest {
            total_records: analysis.total_records,
            average_quality_score: analysis.average_or_sentinel(),
            original_prompt: original_prompt.to_string(),
            problematic_sections: analysis
                .top_problematic(self.limits.max_problematic_sections)
                .to_vec(),
            corrections: corpus.sample(
                self.limits.max_correction_sections,
                self.limits.max_corrections_per_section,
            ),
        }
    }

    /// Render `request` as prompt text, ending with the reply format the
    /// response parser expects.
    pub fn render_prompt(request: &RewriteRequest, format_instructions: &str) -> String {
        let mut problem_lines = String::new();
        for section in &request.problematic_sections {
            let _ = writeln!(
                problem_lines,
                "- {}: {:.0}% problematic ({} needs work, {} wrong)",
                section_display_name(&section.section),
                section.problem_rate * 100.0,
                section.needs_work,
                section.wrong
            );
        }
        if problem_lines.is_empty() {
            problem_lines.push_str("- No section crossed the problem threshold\n");
        }

        let mut correction_lines = String::new();
        for group in &request.corrections {
            let _ = writeln!(correction_lines, "{}:", section_display_name(&group.section));
            for correction in &group.corrections {
                let _ = writeln!(correction_lines, "  - {correction}");
            }
        }
        if correction_lines.is_empty() {
            correction_lines.push_str("- No corrections were supplied\n");
        }

        format!(
            "You are a prompt engineering expert improving an AI system that writes venture capital investment memos.\n\
             \n\
             CURRENT SITUATION:\n\
             Feedback was collected on {total} generated memos with an average quality score of {average:.1}/10.\n\
             \n\
             ORIGINAL PROMPT:\n\
             {original}\n\
             \n\
             FEEDBACK ANALYSIS:\n\
             \n\
             Most Problematic Sections:\n\
             {problems}\n\
             Common User Corrections:\n\
             {corrections}\n\
             {guidelines}\n\
             \n\
             {format}",
            total = request.total_records,
            average = request.average_quality_score,
            original = request.original_prompt,
            problems = problem_lines,
            corrections = correction_lines,
            guidelines = REWRITE_GUIDELINES,
            format = format_instructions,
        )
    }
}
