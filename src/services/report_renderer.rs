//! Text and Markdown rendering of analyses and improvement artifacts.
//!
//! Output is deterministic for a given input; the only clock-dependent value
//! (the comparison timestamp) is passed in by the caller.

use chrono::{DateTime, Local};
use std::fmt::Write as _;

use crate::domain::models::{
    section_display_name, ImprovementArtifact, ImprovementRecord, PatternAnalysis,
};

const RULE_WIDTH: usize = 80;

/// Renders reports for humans and records for programs.
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    max_problematic_sections: usize,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new(5)
    }
}

impl ReportRenderer {
    pub fn new(max_problematic_sections: usize) -> Self {
        Self {
            max_problematic_sections,
        }
    }

    /// Plain-text pattern analysis report.
    pub fn pattern_report(&self, analysis: &PatternAnalysis) -> String {
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);
        let mut out = String::new();

        let _ = writeln!(out, "{heavy}");
        let _ = writeln!(out, "FEEDBACK PATTERN ANALYSIS");
        let _ = writeln!(out, "{heavy}");
        let _ = writeln!(out);
        let _ = writeln!(out, "Total Memos Reviewed: {}", analysis.total_records);
        let _ = writeln!(
            out,
            "Average Quality Score: {:.1}/10",
            analysis.average_or_sentinel()
        );
        let _ = writeln!(out);

        let _ = writeln!(out, "{light}");
        let _ = writeln!(out, "PROBLEMATIC SECTIONS (Most Common Issues)");
        let _ = writeln!(out, "{light}");
        let _ = writeln!(out);

        let top = analysis.top_problematic(self.max_problematic_sections);
        if top.is_empty() {
            let _ = writeln!(out, "No consistently problematic sections identified");
            let _ = writeln!(out);
        }
        for (rank, section) in top.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", rank + 1, section_display_name(&section.section));
            let _ = writeln!(
                out,
                "   Problem Rate: {:.1}% ({} needs work, {} wrong out of {} reviews)",
                section.problem_rate * 100.0,
                section.needs_work,
                section.wrong,
                section.total
            );
            let _ = writeln!(out);
        }

        let _ = writeln!(out, "{light}");
        let _ = writeln!(out, "SECTION RATINGS BREAKDOWN");
        let _ = writeln!(out, "{light}");
        let _ = writeln!(out);

        for stats in analysis.section_ratings.sorted_by_section() {
            if stats.total == 0 {
                continue;
            }
            let _ = writeln!(out, "{}:", section_display_name(&stats.section));
            let _ = writeln!(
                out,
                "  Good: {:.0}%  |  Needs Work: {:.0}%  |  Wrong: {:.0}%",
                stats.percent(stats.good),
                stats.percent(stats.needs_work),
                stats.percent(stats.wrong)
            );
            let _ = writeln!(out);
        }

        out.push_str(&heavy);
        out
    }

    /// Markdown before/after comparison of a prompt rewrite.
    pub fn comparison_report(
        &self,
        artifact: &ImprovementArtifact,
        generated_at: DateTime<Local>,
    ) -> String {
        let analysis = &artifact.analysis;
        let mut out = String::new();

        let _ = writeln!(out, "# Deal Memo Prompt Improvement Report\n");
        let _ = writeln!(
            out,
            "*Generated: {}*\n",
            generated_at.format("%B %d, %Y at %I:%M %p")
        );
        let _ = writeln!(out, "---\n");

        let _ = writeln!(out, "## Analysis Summary\n");
        let _ = writeln!(out, "- **Memos Analyzed**: {}", analysis.total_records);
        let _ = writeln!(
            out,
            "- **Average Quality Score**: {:.1}/10",
            analysis.average_or_sentinel()
        );
        let _ = writeln!(
            out,
            "- **Problematic Sections**: {}\n",
            analysis.problematic_sections.len()
        );

        let _ = writeln!(out, "## Most Problematic Sections\n");
        for section in analysis.top_problematic(self.max_problematic_sections) {
            let _ = writeln!(
                out,
                "- **{}**: {:.0}% problematic",
                section_display_name(&section.section),
                section.problem_rate * 100.0
            );
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "## Original Prompt\n");
        let _ = writeln!(out, "```\n{}\n```\n", artifact.original_prompt);

        let _ = writeln!(out, "## Improved Prompt\n");
        let _ = writeln!(out, "```\n{}\n```\n", artifact.improved_prompt);

        let _ = writeln!(out, "## Key Improvements Made\n");
        for (n, improvement) in artifact.improvements.iter().enumerate() {
            let _ = writeln!(out, "{}. {improvement}", n + 1);
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "## Expected Impact\n");
        let _ = writeln!(out, "{}", artifact.expected_impact);

        out
    }

    /// Pretty JSON for the machine-readable record.
    pub fn record_json(record: &ImprovementRecord) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(record)
    }
}
