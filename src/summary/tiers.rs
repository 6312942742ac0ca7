use serde::Serialize;

/// Confidence strictly above this is a solid prediction.
const SOLID_CONFIDENCE: f64 = 60.0;
/// Confidence strictly above this (and not solid) is moderate.
const MODERATE_CONFIDENCE: f64 = 45.0;
/// Total xG strictly above this means a high-scoring expectation.
const HIGH_GOALS: f64 = 2.5;
const MEDIUM_GOALS: f64 = 1.5;

/// Confidence threshold applied by the "high confidence only" filter.
pub const HIGH_CONFIDENCE_FLOOR: f64 = SOLID_CONFIDENCE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    Solid,
    Moderate,
    Uncertain,
}

impl ConfidenceTier {
    /// Boundary values fall into the lower tier: 60 is moderate, 45 uncertain.
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > SOLID_CONFIDENCE {
            ConfidenceTier::Solid
        } else if confidence > MODERATE_CONFIDENCE {
            ConfidenceTier::Moderate
        } else {
            ConfidenceTier::Uncertain
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ConfidenceTier::Solid => "solid",
            ConfidenceTier::Moderate => "moderate",
            ConfidenceTier::Uncertain => "uncertain",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalExpectation {
    High,
    Medium,
    Low,
}

impl GoalExpectation {
    pub fn from_total_xg(total_xg: f64) -> Self {
        if total_xg > HIGH_GOALS {
            GoalExpectation::High
        } else if total_xg > MEDIUM_GOALS {
            GoalExpectation::Medium
        } else {
            GoalExpectation::Low
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            GoalExpectation::High => "high",
            GoalExpectation::Medium => "medium",
            GoalExpectation::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    SolidPrediction,
    ModeratePrediction,
    UncertainMatch,
}

impl Recommendation {
    pub fn label(&self) -> &str {
        match self {
            Recommendation::SolidPrediction => "Solid prediction",
            Recommendation::ModeratePrediction => "Moderate prediction",
            Recommendation::UncertainMatch => "Uncertain match",
        }
    }
}

impl From<ConfidenceTier> for Recommendation {
    fn from(tier: ConfidenceTier) -> Self {
        match tier {
            ConfidenceTier::Solid => Recommendation::SolidPrediction,
            ConfidenceTier::Moderate => Recommendation::ModeratePrediction,
            ConfidenceTier::Uncertain => Recommendation::UncertainMatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_boundaries() {
        assert_eq!(ConfidenceTier::from_confidence(60.0), ConfidenceTier::Moderate);
        assert_eq!(ConfidenceTier::from_confidence(60.01), ConfidenceTier::Solid);
        assert_eq!(ConfidenceTier::from_confidence(45.0), ConfidenceTier::Uncertain);
        assert_eq!(ConfidenceTier::from_confidence(45.01), ConfidenceTier::Moderate);
        assert_eq!(ConfidenceTier::from_confidence(0.0), ConfidenceTier::Uncertain);
    }

    #[test]
    fn goal_expectation_boundaries() {
        assert_eq!(GoalExpectation::from_total_xg(2.5), GoalExpectation::Medium);
        assert_eq!(GoalExpectation::from_total_xg(2.50001), GoalExpectation::High);
        assert_eq!(GoalExpectation::from_total_xg(1.5), GoalExpectation::Low);
        assert_eq!(GoalExpectation::from_total_xg(1.50001), GoalExpectation::Medium);
        assert_eq!(GoalExpectation::from_total_xg(3.3), GoalExpectation::High);
    }

    #[test]
    fn recommendation_follows_confidence_tier() {
        assert_eq!(Recommendation::from(ConfidenceTier::Solid), Recommendation::SolidPrediction);
        assert_eq!(Recommendation::from(ConfidenceTier::Moderate), Recommendation::ModeratePrediction);
        assert_eq!(Recommendation::from(ConfidenceTier::Uncertain), Recommendation::UncertainMatch);
    }
}
