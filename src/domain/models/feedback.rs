//! Feedback domain model.
//!
//! A feedback record is one human review of a generated memo, captured by the
//! companion feedback tool. Records are immutable once loaded.

use serde::{Deserialize, Serialize};

/// Canonical section rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    /// Section is acceptable as written
    Good,
    /// Section is on the right track but incomplete or shallow
    NeedsWork,
    /// Section is incorrect
    Wrong,
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::NeedsWork => "needs_work",
            Self::Wrong => "wrong",
        }
    }

    /// Normalize a raw rating as written by the feedback tool.
    ///
    /// Hyphen and underscore separators are equivalent (`needs-work` and
    /// `needs_work`). Returns `None` for blank or unrecognized values.
    pub fn normalize(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "good" => Some(Self::Good),
            "needs_work" => Some(Self::NeedsWork),
            "wrong" => Some(Self::Wrong),
            _ => None,
        }
    }

    /// Whether a correction under this rating should steer a prompt rewrite.
    pub fn is_problem(&self) -> bool {
        matches!(self, Self::NeedsWork | Self::Wrong)
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Feedback for a single memo section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionFeedback {
    /// Raw rating as captured; see [`Rating::normalize`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,

    /// Free-text correction suggested by the reviewer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correction: Option<String>,
}

impl SectionFeedback {
    /// The canonical rating, if the raw value is recognized.
    pub fn canonical_rating(&self) -> Option<Rating> {
        self.rating.as_deref().and_then(Rating::normalize)
    }

    /// The correction text trimmed, or `None` when blank.
    pub fn correction_text(&self) -> Option<&str> {
        self.correction
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// One reviewed memo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Where the record came from (file name)
    pub source_id: String,

    /// Overall quality score (1-10), when the reviewer gave one
    pub overall_quality_score: Option<f64>,

    /// Section feedback in the order the reviewer's document lists it
    pub sections: Vec<(String, SectionFeedback)>,
}

impl FeedbackRecord {
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            overall_quality_score: None,
            sections: Vec::new(),
        }
    }

    /// Builder-style score setter.
    pub fn with_score(mut self, score: f64) -> Self {
        self.overall_quality_score = Some(score);
        self
    }

    /// Builder-style section setter.
    pub fn with_section(
        mut self,
        section_id: impl Into<String>,
        rating: Option<&str>,
        correction: Option<&str>,
    ) -> Self {
        self.sections.push((
            section_id.into(),
            SectionFeedback {
                rating: rating.map(str::to_string),
                correction: correction.map(str::to_string),
            },
        ));
        self
    }
}

/// Turn a section id like `market_analysis` into `Market Analysis`.
pub fn section_display_name(section_id: &str) -> String {
    section_id
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
