//! Correction corpus: reviewer corrections grouped by section.

use serde::Serialize;

use crate::domain::models::{PatternAnalysis, SectionCorrections};

/// Corrections from `needs_work`/`wrong` ratings, grouped by section.
///
/// Sections keep the order they first appear in the correction list and
/// corrections keep load order within a section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorrectionCorpus {
    sections: Vec<SectionCorrections>,
}

impl CorrectionCorpus {
    pub fn build(analysis: &PatternAnalysis) -> Self {
        let mut sections: Vec<SectionCorrections> = Vec::new();

        for correction in analysis.corrections.iter().filter(|c| c.is_actionable()) {
            match sections.iter_mut().find(|s| s.section == correction.section) {
                Some(group) => group.corrections.push(correction.text.clone()),
                None => sections.push(SectionCorrections {
                    section: correction.section.clone(),
                    corrections: vec![correction.text.clone()],
                }),
            }
        }

        Self { sections }
    }

    /// Bounded view for a rewrite request: the first `max_sections` sections,
    /// each with at most `max_per_section` corrections.
    pub fn sample(&self, max_sections: usize, max_per_section: usize) -> Vec<SectionCorrections> {
        self.sections
            .iter()
            .take(max_sections)
            .map(|group| SectionCorrections {
                section: group.section.clone(),
                corrections: group.corrections.iter().take(max_per_section).cloned().collect(),
            })
            .collect()
    }

    /// Corrections for one section; empty when it has none.
    pub fn for_section(&self, section: &str) -> &[String] {
        self.sections
            .iter()
            .find(|group| group.section == section)
            .map(|group| group.corrections.as_slice())
            .unwrap_or(&[])
    }

    pub fn sections(&self) -> &[SectionCorrections] {
        &self.sections
    }
}
