//! Full-time outcome selection and probability sanity checks.

use serde::Serialize;
use std::fmt;

use crate::data::models::OutcomeProbabilities;

/// Full-time result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Home,
    Draw,
    Away,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Home => write!(f, "Home"),
            Outcome::Draw => write!(f, "Draw"),
            Outcome::Away => write!(f, "Away"),
        }
    }
}

/// Pick the most likely outcome and its probability.
///
/// Ties resolve in the order home → draw → away: the first outcome holding
/// the maximum wins.
pub fn derive_outcome(probs: &OutcomeProbabilities) -> (Outcome, f64) {
    let candidates = [
        (Outcome::Home, probs.home_win),
        (Outcome::Draw, probs.draw),
        (Outcome::Away, probs.away_win),
    ];
    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.1 > best.1 {
            best = *candidate;
        }
    }
    best
}

/// Non-fatal data-quality problems with a set of outcome probabilities.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProbabilityWarning {
    /// The three outcomes do not add up to 100 within the tolerance.
    SumOutOfRange { sum: f64, tolerance: f64 },
    Negative { outcome: Outcome, value: f64 },
}

impl fmt::Display for ProbabilityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbabilityWarning::SumOutOfRange { sum, tolerance } => write!(
                f,
                "outcome probabilities sum to {:.2} (expected 100 ± {})",
                sum, tolerance
            ),
            ProbabilityWarning::Negative { outcome, value } => {
                write!(f, "{} probability is negative ({})", outcome, value)
            }
        }
    }
}

pub fn check_probabilities(probs: &OutcomeProbabilities, tolerance: f64) -> Vec<ProbabilityWarning> {
    let mut warnings = Vec::new();
    for (outcome, value) in [
        (Outcome::Home, probs.home_win),
        (Outcome::Draw, probs.draw),
        (Outcome::Away, probs.away_win),
    ] {
        if value < 0.0 {
            warnings.push(ProbabilityWarning::Negative { outcome, value });
        }
    }
    let sum = probs.sum();
    if (sum - 100.0).abs() > tolerance {
        warnings.push(ProbabilityWarning::SumOutOfRange { sum, tolerance });
    }
    warnings
}
