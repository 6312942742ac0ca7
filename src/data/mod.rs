use std::collections::HashSet;

pub mod fixtures;
pub mod models;

pub use fixtures::{builtin_slate, load_slate};
use models::*;

use crate::error::DataError;

/// The fixed set of matches served by one process. Built once at startup and
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Slate {
    fixtures: Vec<MatchFixture>,
}

impl Slate {
    /// Build a slate, rejecting duplicate match identifiers.
    pub fn new(fixtures: Vec<MatchFixture>) -> Result<Self, DataError> {
        let mut seen = HashSet::new();
        for f in &fixtures {
            if !seen.insert(f.record.id.as_str()) {
                return Err(DataError::DuplicateMatch(f.record.id.clone()));
            }
        }
        Ok(Slate { fixtures })
    }

    pub fn fixtures(&self) -> &[MatchFixture] {
        &self.fixtures
    }

    pub fn get(&self, match_id: &str) -> Option<&MatchFixture> {
        self.fixtures.iter().find(|f| f.record.id == match_id)
    }

    pub fn records(&self) -> Vec<MatchRecord> {
        self.fixtures.iter().map(|f| f.record.clone()).collect()
    }

    /// One comparison row per match, in slate order.
    pub fn comparison(&self) -> Vec<ComparisonRow> {
        self.fixtures.iter().map(ComparisonRow::from).collect()
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }
}
