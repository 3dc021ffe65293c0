//! Pattern aggregation over feedback records.
//!
//! Folds a batch of records into per-section rating counts, the correction
//! list and the quality-score trend, then ranks sections whose problem rate
//! exceeds the threshold. Aggregation is pure: the same records always yield
//! the same analysis.

use tracing::{debug, warn};

use crate::domain::models::{
    AnalysisConfig, Correction, FeedbackRecord, PatternAnalysis, ProblematicSection,
    SectionRatings,
};

/// Accumulator threaded through the fold.
#[derive(Default)]
struct Tally {
    ratings: SectionRatings,
    corrections: Vec<Correction>,
    scores: Vec<f64>,
}

/// Aggregates feedback records into a [`PatternAnalysis`].
#[derive(Debug, Clone)]
pub struct PatternAggregator {
    problem_rate_threshold: f64,
}

impl Default for PatternAggregator {
    fn default() -> Self {
        Self::new(AnalysisConfig::default().problem_rate_threshold)
    }
}

impl PatternAggregator {
    pub fn new(problem_rate_threshold: f64) -> Self {
        Self {
            problem_rate_threshold,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.problem_rate_threshold)
    }

    pub fn aggregate(&self, records: &[FeedbackRecord]) -> PatternAnalysis {
        let tally = records.iter().fold(Tally::default(), Self::tally_record);

        let average_quality_score = if tally.scores.is_empty() {
            None
        } else {
            Some(tally.scores.iter().sum::<f64>() / tally.scores.len() as f64)
        };

        let problematic_sections = self.rank_problematic(&tally.ratings);

        debug!(
            records = records.len(),
            sections = tally.ratings.len(),
            problematic = problematic_sections.len(),
            corrections = tally.corrections.len(),
            "aggregated feedback patterns"
        );
        if !records.is_empty() && tally.ratings.is_empty() {
            warn!(records = records.len(), "feedback carries no recognized section ratings");
        }

        PatternAnalysis {
            total_records: records.len(),
            section_ratings: tally.ratings,
            problematic_sections,
            corrections: tally.corrections,
            quality_score_trend: tally.scores,
            average_quality_score,
        }
    }

    fn tally_record(mut tally: Tally, record: &FeedbackRecord) -> Tally {
        if let Some(score) = record.overall_quality_score {
            tally.scores.push(score);
        }

        for (section, feedback) in &record.sections {
            let rating = feedback.canonical_rating();

            match (rating, feedback.rating.as_deref().map(str::trim)) {
                (Some(rating), _) => {
                    tally.ratings = std::mem::take(&mut tally.ratings).with_rating(section, rating);
                }
                (None, Some(raw)) if !raw.is_empty() => {
                    warn!(
                        source_id = %record.source_id,
                        section = %section,
                        rating = %raw,
                        "ignoring unrecognized rating"
                    );
                }
                _ => {}
            }

            if let Some(text) = feedback.correction_text() {
                tally.corrections.push(Correction {
                    section: section.clone(),
                    text: text.to_string(),
                    rating,
                });
            }
        }

        tally
    }

    /// Sections above the threshold, worst first.
    ///
    /// The sort is stable so equal rates keep first-rated order.
    fn rank_problematic(&self, ratings: &SectionRatings) -> Vec<ProblematicSection> {
        let mut problematic: Vec<ProblematicSection> = ratings
            .iter()
            .filter_map(|stats| {
                let rate = stats.problem_rate()?;
                (rate > self.problem_rate_threshold).then(|| ProblematicSection {
                    section: stats.section.clone(),
                    problem_rate: rate,
                    needs_work: stats.needs_work,
                    wrong: stats.wrong,
                    total: stats.total,
                })
            })
            .collect();

        problematic.sort_by(|a, b| b.problem_rate.total_cmp(&a.problem_rate));
        problematic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::CorrectionCorpus;
    use crate::domain::models::Rating;

    fn record(id: &str) -> FeedbackRecord {
        FeedbackRecord::new(id)
    }

    #[test]
    fn test_boundary_rate_is_not_problematic() {
        // 2 wrong + 3 good = 0.4 exactly
        let records: Vec<_> = ["wrong", "wrong", "good", "good", "good"]
            .iter()
            .enumerate()
            .map(|(i, rating)| record(&format!("r{i}")).with_section("business_model", Some(rating), None))
            .collect();

        let analysis = PatternAggregator::default().aggregate(&records);

        let stats = analysis.section_ratings.get("business_model");
        assert_eq!(stats.problem_rate(), Some(0.4));
        assert!(analysis.problematic_sections.is_empty());
    }

    #[test]
    fn test_ranking_by_problem_rate() {
        let mut records = Vec::new();
        // section_a: 3 wrong of 5 = 0.6
        for (i, rating) in ["wrong", "wrong", "wrong", "good", "good"].iter().enumerate() {
            records.push(record(&format!("a{i}")).with_section("section_a", Some(rating), None));
        }
        // section_b: 9 needs_work of 20 = 0.45
        for i in 0..20 {
            let rating = if i < 9 { "needs_work" } else { "good" };
            records.push(record(&format!("b{i}")).with_section("section_b", Some(rating), None));
        }

        let analysis = PatternAggregator::default().aggregate(&records);

        let ranked: Vec<_> = analysis
            .problematic_sections
            .iter()
            .map(|p| (p.section.as_str(), p.problem_rate))
            .collect();
        assert_eq!(ranked, vec![("section_a", 0.6), ("section_b", 0.45)]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let records = vec![
            record("1")
                .with_section("zeta", Some("wrong"), None)
                .with_section("alpha", Some("wrong"), None)
                .with_section("mid", Some("needs-work"), None),
        ];

        let analysis = PatternAggregator::default().aggregate(&records);

        let order: Vec<_> = analysis
            .problematic_sections
            .iter()
            .map(|p| p.section.as_str())
            .collect();
        assert_eq!(order, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_hyphen_and_underscore_share_bucket() {
        let records = vec![
            record("1").with_section("market_analysis", Some("needs-work"), None),
            record("2").with_section("market_analysis", Some("needs_work"), None),
        ];

        let analysis = PatternAggregator::default().aggregate(&records);

        let stats = analysis.section_ratings.get("market_analysis");
        assert_eq!(stats.needs_work, 2);
        assert_eq!(stats.total, 2);
    }

    #[test]
    fn test_unrecognized_ratings_are_excluded_entirely() {
        let records = vec![
            record("1")
                .with_section("team", Some("excellent"), None)
                .with_section("market", Some("good"), None),
            record("2").with_section("team", Some(""), Some("Add founder bios")),
        ];

        let analysis = PatternAggregator::default().aggregate(&records);

        assert!(!analysis.section_ratings.contains("team"));
        assert_eq!(analysis.section_ratings.get("team").total, 0);
        assert_eq!(analysis.section_ratings.get("market").total, 1);
        // the record is still counted and its correction kept
        assert_eq!(analysis.total_records, 2);
        assert_eq!(analysis.corrections.len(), 1);
        assert_eq!(analysis.corrections[0].rating, None);
    }

    #[test]
    fn test_no_scores_yields_sentinel_average() {
        let records = vec![
            record("1").with_section("market", Some("good"), None),
            record("2").with_section("market", Some("wrong"), None),
        ];

        let analysis = PatternAggregator::default().aggregate(&records);

        assert!(analysis.quality_score_trend.is_empty());
        assert_eq!(analysis.average_quality_score, None);
        assert_eq!(analysis.average_or_sentinel(), 0.0);
    }

    #[test]
    fn test_quality_trend_follows_load_order() {
        let records = vec![
            record("1").with_score(6.0),
            record("2"),
            record("3").with_score(8.0),
            record("4").with_score(7.0),
        ];

        let analysis = PatternAggregator::default().aggregate(&records);

        assert_eq!(analysis.quality_score_trend, vec![6.0, 8.0, 7.0]);
        assert_eq!(analysis.average_quality_score, Some(7.0));
    }

    #[test]
    fn test_end_to_end_scenario() {
        let records = vec![
            record("feedback_1.json")
                .with_section("market_analysis", Some("wrong"), Some("Needs TAM figures"))
                .with_section("company_overview", Some("good"), None),
            record("feedback_2.json")
                .with_section("market_analysis", Some("wrong"), None)
                .with_section("company_overview", Some("good"), None),
            record("feedback_3.json")
                .with_section("market_analysis", Some("wrong"), None)
                .with_section("company_overview", Some("good"), None),
        ];

        let analysis = PatternAggregator::default().aggregate(&records);

        assert_eq!(analysis.total_records, 3);
        assert_eq!(analysis.problematic_sections.len(), 1);
        assert_eq!(analysis.problematic_sections[0].section, "market_analysis");
        assert_eq!(analysis.problematic_sections[0].problem_rate, 1.0);
        assert_eq!(
            analysis.section_ratings.get("company_overview").problem_rate(),
            Some(0.0)
        );
        assert_eq!(
            analysis.corrections,
            vec![Correction {
                section: "market_analysis".to_string(),
                text: "Needs TAM figures".to_string(),
                rating: Some(Rating::Wrong),
            }]
        );
        assert_eq!(
            CorrectionCorpus::build(&analysis).for_section("market_analysis"),
            ["Needs TAM figures".to_string()]
        );
    }

    #[test]
    fn test_custom_threshold() {
        let records = vec![
            record("1").with_section("team", Some("wrong"), None),
            record("2").with_section("team", Some("good"), None),
            record("3").with_section("team", Some("good"), None),
        ];

        let strict = PatternAggregator::new(0.25).aggregate(&records);
        let lenient = PatternAggregator::new(0.5).aggregate(&records);

        assert_eq!(strict.problematic_sections.len(), 1);
        assert!(lenient.problematic_sections.is_empty());
    }
}
