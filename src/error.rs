use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Which of a match's distributions a query ran against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionKind {
    ExactScore,
    Handicap,
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistributionKind::ExactScore => write!(f, "exact-score"),
            DistributionKind::Handicap => write!(f, "handicap"),
        }
    }
}

/// Errors raised while building or querying match data.
#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    /// A required numeric field is absent; the record is rejected.
    #[error("match {match_id}: missing required field `{field}`")]
    MissingField {
        match_id: String,
        field: &'static str,
    },

    #[error("match {match_id}: invalid {field} value {value:?}")]
    InvalidField {
        match_id: String,
        field: &'static str,
        value: String,
    },

    #[error("duplicate match id {0}")]
    DuplicateMatch(String),

    /// A "most probable" or "top-N" query found nothing to rank.
    #[error("match {match_id}: {kind} distribution is empty")]
    EmptyDistribution {
        match_id: String,
        kind: DistributionKind,
    },
}

impl DataError {
    pub fn empty(match_id: &str, kind: DistributionKind) -> Self {
        DataError::EmptyDistribution {
            match_id: match_id.to_string(),
            kind,
        }
    }
}
