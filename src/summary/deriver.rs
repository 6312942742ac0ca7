use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::warn;

use super::outcome::{check_probabilities, derive_outcome, Outcome, ProbabilityWarning};
use super::ranking::{most_probable, rank_top_n};
use super::tiers::{ConfidenceTier, GoalExpectation, Recommendation, HIGH_CONFIDENCE_FLOOR};
use crate::data::models::{HandicapLine, MatchFixture, Scoreline, Weighted};
use crate::error::{DataError, DistributionKind};

/// Prediction summary for one match. Recomputed on every read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedSummary {
    pub match_id: String,
    pub home_team: String,
    pub away_team: String,
    pub league: String,
    pub kickoff: NaiveDateTime,
    pub outcome: Outcome,
    /// Probability of `outcome`, in percent
    pub confidence: f64,
    pub confidence_tier: ConfidenceTier,
    pub total_xg: f64,
    pub goal_expectation: GoalExpectation,
    pub recommendation: Recommendation,
    pub top_scores: Vec<Weighted<Scoreline>>,
    pub most_probable_score: Weighted<Scoreline>,
    pub top_handicap: Weighted<HandicapLine>,
    pub warnings: Vec<ProbabilityWarning>,
}

impl DerivedSummary {
    /// Name of the predicted winner, or `None` for a draw.
    pub fn predicted_winner(&self) -> Option<&str> {
        match self.outcome {
            Outcome::Home => Some(self.home_team.as_str()),
            Outcome::Away => Some(self.away_team.as_str()),
            Outcome::Draw => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DeriverOptions {
    /// How many exact scores a summary carries
    pub top_scores: usize,
    /// Allowed distance of the outcome sum from 100
    pub probability_tolerance: f64,
}

impl Default for DeriverOptions {
    fn default() -> Self {
        DeriverOptions {
            top_scores: 3,
            probability_tolerance: 0.5,
        }
    }
}

/// Turns fixtures into summaries. Holds only immutable options, so one
/// instance can be shared freely between callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryDeriver {
    options: DeriverOptions,
}

impl SummaryDeriver {
    pub fn new(options: DeriverOptions) -> Self {
        SummaryDeriver { options }
    }

    pub fn options(&self) -> DeriverOptions {
        self.options
    }

    pub fn derive(&self, fixture: &MatchFixture) -> Result<DerivedSummary, DataError> {
        let record = &fixture.record;

        let warnings = check_probabilities(&fixture.probabilities, self.options.probability_tolerance);
        for w in &warnings {
            warn!("Match {}: {}", record.id, w);
        }

        let (outcome, confidence) = derive_outcome(&fixture.probabilities);
        let confidence_tier = ConfidenceTier::from_confidence(confidence);
        let total_xg = record.total_xg();

        let top_scores = rank_top_n(&fixture.exact_scores, self.options.top_scores)
            .map_err(|_| DataError::empty(&record.id, DistributionKind::ExactScore))?;
        let most_probable_score = most_probable(&fixture.exact_scores)
            .map_err(|_| DataError::empty(&record.id, DistributionKind::ExactScore))?;
        let top_handicap = most_probable(&fixture.handicaps)
            .map_err(|_| DataError::empty(&record.id, DistributionKind::Handicap))?;

        Ok(DerivedSummary {
            match_id: record.id.clone(),
            home_team: record.home_team.clone(),
            away_team: record.away_team.clone(),
            league: record.league.clone(),
            kickoff: record.kickoff,
            outcome,
            confidence,
            confidence_tier,
            total_xg,
            goal_expectation: GoalExpectation::from_total_xg(total_xg),
            recommendation: confidence_tier.into(),
            top_scores,
            most_probable_score,
            top_handicap,
            warnings,
        })
    }

    /// Exact scores of one fixture, best first, truncated to `n`.
    pub fn ranked_scores(
        &self,
        fixture: &MatchFixture,
        n: usize,
    ) -> Result<Vec<Weighted<Scoreline>>, DataError> {
        rank_top_n(&fixture.exact_scores, n)
            .map_err(|_| DataError::empty(&fixture.record.id, DistributionKind::ExactScore))
    }

    /// All handicap lines of one fixture, best first.
    pub fn ranked_handicaps(
        &self,
        fixture: &MatchFixture,
    ) -> Result<Vec<Weighted<HandicapLine>>, DataError> {
        rank_top_n(&fixture.handicaps, fixture.handicaps.len())
            .map_err(|_| DataError::empty(&fixture.record.id, DistributionKind::Handicap))
    }
}

/// Keep summaries whose confidence clears `min_confidence`, and also the
/// high-confidence floor when `high_only` is set.
pub fn filter_by_confidence(
    summaries: Vec<DerivedSummary>,
    min_confidence: f64,
    high_only: bool,
) -> Vec<DerivedSummary> {
    summaries
        .into_iter()
        .filter(|s| !(high_only && s.confidence < HIGH_CONFIDENCE_FLOOR))
        .filter(|s| s.confidence >= min_confidence)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::builtin_slate;
    use crate::data::models::Distribution;
    use approx::assert_relative_eq;

    fn summaries() -> Vec<DerivedSummary> {
        let deriver = SummaryDeriver::default();
        builtin_slate()
            .unwrap()
            .fixtures()
            .iter()
            .map(|f| deriver.derive(f).unwrap())
            .collect()
    }

    #[test]
    fn arsenal_tottenham_summary() {
        let s = &summaries()[0];
        assert_eq!(s.outcome, Outcome::Home);
        assert_eq!(s.predicted_winner(), Some("Arsenal"));
        assert_relative_eq!(s.confidence, 65.2);
        assert_eq!(s.confidence_tier, ConfidenceTier::Solid);
        assert_relative_eq!(s.total_xg, 3.3, epsilon = 1e-9);
        assert_eq!(s.goal_expectation, GoalExpectation::High);
        assert_eq!(s.recommendation, Recommendation::SolidPrediction);
        assert_eq!(s.top_handicap.label, HandicapLine(0));
        assert!(s.warnings.is_empty());
    }

    #[test]
    fn inter_milan_is_moderate() {
        let s = &summaries()[1];
        assert_eq!(s.outcome, Outcome::Home);
        assert_relative_eq!(s.confidence, 59.4);
        assert_eq!(s.confidence_tier, ConfidenceTier::Moderate);
        assert_eq!(s.goal_expectation, GoalExpectation::High);
        assert_eq!(s.most_probable_score.label, Scoreline::new(0, 1));
    }

    #[test]
    fn elche_real_madrid_summary() {
        let s = &summaries()[2];
        assert_eq!(s.outcome, Outcome::Away);
        assert_eq!(s.predicted_winner(), Some("Real Madrid"));
        assert_relative_eq!(s.confidence, 70.6);
        assert_eq!(s.confidence_tier, ConfidenceTier::Solid);
        assert_eq!(s.most_probable_score.label, Scoreline::new(0, 1));
        assert_relative_eq!(s.most_probable_score.probability, 12.0);
        let top: Vec<String> = s.top_scores.iter().map(|w| w.label.to_string()).collect();
        assert_eq!(top, ["0-1", "1-2", "1-1"]);
        assert_eq!(s.top_handicap.label, HandicapLine(-1));
    }

    #[test]
    fn filter_keeps_all_above_forty() {
        let kept = filter_by_confidence(summaries(), 40.0, false);
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn filter_at_sixty_drops_inter_milan() {
        let kept = filter_by_confidence(summaries(), 60.0, false);
        let ids: Vec<_> = kept.iter().map(|s| s.match_id.as_str()).collect();
        assert_eq!(ids, ["ARS-TOT", "ELC-RMA"]);
    }

    #[test]
    fn high_only_applies_independently_of_minimum() {
        let kept = filter_by_confidence(summaries(), 0.0, true);
        assert_eq!(kept.len(), 2);
        let kept = filter_by_confidence(summaries(), 68.0, true);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].match_id, "ELC-RMA");
    }

    #[test]
    fn top_scores_follows_options() {
        let deriver = SummaryDeriver::new(DeriverOptions {
            top_scores: 10,
            ..DeriverOptions::default()
        });
        let slate = builtin_slate().unwrap();
        let s = deriver.derive(&slate.fixtures()[0]).unwrap();
        assert_eq!(s.top_scores.len(), 10);
        assert_eq!(s.top_scores[0].label, Scoreline::new(0, 1));
    }

    #[test]
    fn skewed_probabilities_still_produce_an_outcome() {
        let mut fixture = builtin_slate().unwrap().fixtures()[0].clone();
        fixture.probabilities.draw = 40.0;
        let s = SummaryDeriver::default().derive(&fixture).unwrap();
        assert_eq!(s.outcome, Outcome::Home);
        assert_eq!(s.warnings.len(), 1);
    }

    #[test]
    fn empty_distributions_are_reported() {
        let mut fixture = builtin_slate().unwrap().fixtures()[1].clone();
        fixture.handicaps = Distribution::from_pairs([]);
        let err = SummaryDeriver::default().derive(&fixture).unwrap_err();
        assert_eq!(err, DataError::empty("INT-MIL", DistributionKind::Handicap));

        fixture.exact_scores = Distribution::from_pairs([]);
        let deriver = SummaryDeriver::default();
        assert_eq!(
            deriver.ranked_scores(&fixture, 10).unwrap_err(),
            DataError::empty("INT-MIL", DistributionKind::ExactScore)
        );
    }

    #[test]
    fn ranked_handicaps_cover_every_line() {
        let slate = builtin_slate().unwrap();
        let ranked = SummaryDeriver::default()
            .ranked_handicaps(slate.get("ELC-RMA").unwrap())
            .unwrap();
        let lines: Vec<String> = ranked.iter().map(|w| w.label.to_string()).collect();
        assert_eq!(lines, ["-1", "0", "+1", "+2"]);
    }
}
