pub mod deriver;
pub mod outcome;
pub mod ranking;
pub mod tiers;

pub use deriver::{filter_by_confidence, DerivedSummary, DeriverOptions, SummaryDeriver};
