//! Aggregate feedback statistics.
//!
//! Everything in this module is derived from a batch of feedback records and
//! rebuilt from scratch on every run.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::feedback::Rating;

/// Rating counts for one section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionStats {
    pub section: String,
    pub good: u32,
    pub needs_work: u32,
    pub wrong: u32,
    pub total: u32,
}

impl SectionStats {
    /// All-zero counts for a section.
    pub fn empty(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            ..Self::default()
        }
    }

    /// Return a copy with one more rating counted.
    #[must_use]
    pub fn counted(mut self, rating: Rating) -> Self {
        match rating {
            Rating::Good => self.good += 1,
            Rating::NeedsWork => self.needs_work += 1,
            Rating::Wrong => self.wrong += 1,
        }
        self.total += 1;
        self
    }

    /// Share of ratings that are `needs_work` or `wrong`, `None` if unrated.
    pub fn problem_rate(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(f64::from(self.needs_work + self.wrong) / f64::from(self.total))
    }

    /// Percentage of `count` against the section total (0 when unrated).
    pub fn percent(&self, count: u32) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(count) / f64::from(self.total) * 100.0
    }
}

/// Per-section stats in the order sections were first rated.
///
/// Lookups of sections that were never rated return zero counts rather than
/// inserting anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<SectionStats>", into = "Vec<SectionStats>")]
pub struct SectionRatings {
    entries: Vec<SectionStats>,
    index: HashMap<String, usize>,
}

impl SectionRatings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the ratings with `rating` counted against `section`.
    #[must_use]
    pub fn with_rating(mut self, section: &str, rating: Rating) -> Self {
        match self.index.get(section) {
            Some(&position) => {
                let stats = std::mem::take(&mut self.entries[position]);
                self.entries[position] = stats.counted(rating);
            }
            None => {
                self.index.insert(section.to_string(), self.entries.len());
                self.entries.push(SectionStats::empty(section).counted(rating));
            }
        }
        self
    }

    /// Stats for `section`; zero counts when the section was never rated.
    pub fn get(&self, section: &str) -> SectionStats {
        self.index
            .get(section)
            .map(|&position| self.entries[position].clone())
            .unwrap_or_else(|| SectionStats::empty(section))
    }

    pub fn contains(&self, section: &str) -> bool {
        self.index.contains_key(section)
    }

    /// Stats in first-rated order.
    pub fn iter(&self) -> impl Iterator<Item = &SectionStats> {
        self.entries.iter()
    }

    /// Stats sorted by section id.
    pub fn sorted_by_section(&self) -> Vec<&SectionStats> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.section.cmp(&b.section));
        sorted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<SectionStats>> for SectionRatings {
    fn from(entries: Vec<SectionStats>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(position, stats)| (stats.section.clone(), position))
            .collect();
        Self { entries, index }
    }
}

impl From<SectionRatings> for Vec<SectionStats> {
    fn from(ratings: SectionRatings) -> Self {
        ratings.entries
    }
}

/// A section whose problem rate exceeds the configured threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblematicSection {
    pub section: String,
    pub problem_rate: f64,
    pub needs_work: u32,
    pub wrong: u32,
    pub total: u32,
}

/// A reviewer's free-text correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    pub section: String,
    pub text: String,
    /// Canonical rating given alongside the correction, if any
    pub rating: Option<Rating>,
}

impl Correction {
    /// Whether this correction should steer a prompt rewrite.
    pub fn is_actionable(&self) -> bool {
        self.rating.is_some_and(|rating| rating.is_problem())
    }
}

/// Result of aggregating a batch of feedback records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternAnalysis {
    /// Number of feedback records analyzed
    pub total_records: usize,

    /// Rating counts per section
    pub section_ratings: SectionRatings,

    /// Sections above the problem threshold, worst first
    pub problematic_sections: Vec<ProblematicSection>,

    /// Every non-empty correction, in load order
    pub corrections: Vec<Correction>,

    /// Overall quality scores in load order
    pub quality_score_trend: Vec<f64>,

    /// Mean of the trend; `None` when no record carried a score
    pub average_quality_score: Option<f64>,
}

impl PatternAnalysis {
    /// Average score for display, `0.0` when undefined.
    pub fn average_or_sentinel(&self) -> f64 {
        self.average_quality_score.unwrap_or(0.0)
    }

    /// The `limit` worst sections.
    pub fn top_problematic(&self, limit: usize) -> &[ProblematicSection] {
        &self.problematic_sections[..self.problematic_sections.len().min(limit)]
    }
}
