use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Static description of a fixture: teams, kickoff and pre-match ratings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    /// Unique match identifier, e.g. "ARS-TOT"
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    pub league: String,
    pub kickoff: NaiveDateTime,
    pub home_elo: f64,
    pub away_elo: f64,
    /// Offensive-rating delta in percent (signed)
    pub home_tilt: f64,
    pub away_tilt: f64,
    pub home_world_rank: Option<u32>,
    pub away_world_rank: Option<u32>,
    pub home_country_rank: Option<u32>,
    pub away_country_rank: Option<u32>,
    /// Expected goals for the home side (non-negative)
    pub home_xg: f64,
    pub away_xg: f64,
}

impl MatchRecord {
    pub fn total_xg(&self) -> f64 {
        self.home_xg + self.away_xg
    }
}

/// Full-time result probabilities, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutcomeProbabilities {
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
}

impl OutcomeProbabilities {
    pub fn sum(&self) -> f64 {
        self.home_win + self.draw + self.away_win
    }
}

/// A final scoreline, written "home-away".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scoreline {
    pub home: u32,
    pub away: u32,
}

impl Scoreline {
    pub fn new(home: u32, away: u32) -> Self {
        Scoreline { home, away }
    }
}

impl fmt::Display for Scoreline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

impl FromStr for Scoreline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (home, away) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("expected \"home-away\", got {:?}", s))?;
        let home = home.trim().parse().map_err(|_| format!("bad home goals in {:?}", s))?;
        let away = away.trim().parse().map_err(|_| format!("bad away goals in {:?}", s))?;
        Ok(Scoreline::new(home, away))
    }
}

impl Serialize for Scoreline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Goal-line adjustment applied to the home side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandicapLine(pub i32);

impl fmt::Display for HandicapLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for HandicapLine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i32>()
            .map(HandicapLine)
            .map_err(|_| format!("expected a signed integer line, got {:?}", s))
    }
}

impl Serialize for HandicapLine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One labelled entry of a distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Weighted<K> {
    pub label: K,
    /// Probability in percent
    pub probability: f64,
}

/// Ordered (label, probability) pairs. Insertion order is kept because it
/// decides ties when ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Distribution<K> {
    entries: Vec<Weighted<K>>,
}

impl<K> Distribution<K> {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (K, f64)>) -> Self {
        Distribution {
            entries: pairs
                .into_iter()
                .map(|(label, probability)| Weighted { label, probability })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[Weighted<K>] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

pub type ExactScoreDistribution = Distribution<Scoreline>;
pub type HandicapDistribution = Distribution<HandicapLine>;

/// Everything known about one match before derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchFixture {
    pub record: MatchRecord,
    pub probabilities: OutcomeProbabilities,
    pub exact_scores: ExactScoreDistribution,
    pub handicaps: HandicapDistribution,
}

/// Side-by-side numbers for one match, as shown in the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub match_id: String,
    pub home_team: String,
    pub away_team: String,
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
    pub home_elo: f64,
    pub away_elo: f64,
    pub home_xg: f64,
    pub away_xg: f64,
    pub home_tilt: f64,
    pub away_tilt: f64,
}

impl From<&MatchFixture> for ComparisonRow {
    fn from(f: &MatchFixture) -> Self {
        let r = &f.record;
        ComparisonRow {
            match_id: r.id.clone(),
            home_team: r.home_team.clone(),
            away_team: r.away_team.clone(),
            home_win: f.probabilities.home_win,
            draw: f.probabilities.draw,
            away_win: f.probabilities.away_win,
            home_elo: r.home_elo,
            away_elo: r.away_elo,
            home_xg: r.home_xg,
            away_xg: r.away_xg,
            home_tilt: r.home_tilt,
            away_tilt: r.away_tilt,
        }
    }
}
