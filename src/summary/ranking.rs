//! Ranking of exact-score and handicap distributions.

use thiserror::Error;

use crate::data::models::{Distribution, Weighted};

/// Returned by queries that need at least one entry to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("distribution is empty")]
pub struct EmptyDistribution;

/// Entries sorted by descending probability, truncated to `n`.
///
/// The sort is stable, so equal probabilities keep their insertion order.
pub fn rank_top_n<K: Clone>(
    dist: &Distribution<K>,
    n: usize,
) -> Result<Vec<Weighted<K>>, EmptyDistribution> {
    if dist.is_empty() {
        return Err(EmptyDistribution);
    }
    let mut ranked = dist.entries().to_vec();
    ranked.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    ranked.truncate(n);
    Ok(ranked)
}

/// The highest-probability entry; the first one wins a tie.
pub fn most_probable<K: Clone>(dist: &Distribution<K>) -> Result<Weighted<K>, EmptyDistribution> {
    let mut entries = dist.entries().iter();
    let mut best = entries.next().ok_or(EmptyDistribution)?;
    for entry in entries {
        if entry.probability > best.probability {
            best = entry;
        }
    }
    Ok(best.clone())
}
