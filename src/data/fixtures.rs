//! Fixture loading.
//!
//! Fixtures arrive as JSON documents shaped like `fixtures/matchday.json`.
//! Score and handicap distributions are arrays of `[label, probability]`
//! pairs so that their order survives parsing; ranking ties depend on it.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::str::FromStr;
use tracing::{debug, info};

use super::models::*;
use super::Slate;
use crate::error::DataError;

/// The reference matchday, compiled into the binary.
const BUILTIN_FIXTURES: &str = include_str!("../../fixtures/matchday.json");

#[derive(Debug, Deserialize)]
struct RawSlate {
    matches: Vec<RawMatch>,
}

#[derive(Debug, Deserialize)]
struct RawMatch {
    match_id: String,
    home_team: String,
    away_team: String,
    league: String,
    date: String,
    time: String,
    home_elo: Option<f64>,
    away_elo: Option<f64>,
    home_tilt: Option<f64>,
    away_tilt: Option<f64>,
    home_rank: Option<u32>,
    away_rank: Option<u32>,
    home_country_rank: Option<u32>,
    away_country_rank: Option<u32>,
    home_expected_goals: Option<f64>,
    away_expected_goals: Option<f64>,
    outcome: Option<RawOutcome>,
    #[serde(default)]
    exact_scores: Vec<(String, f64)>,
    #[serde(default)]
    handicaps: Vec<(String, f64)>,
}

#[derive(Debug, Deserialize)]
struct RawOutcome {
    home_win: Option<f64>,
    draw: Option<f64>,
    away_win: Option<f64>,
}

/// Parse the compiled-in reference slate.
pub fn builtin_slate() -> Result<Slate> {
    parse_slate(BUILTIN_FIXTURES).context("Built-in fixtures are malformed")
}

/// Read and validate a fixture file from disk.
pub fn load_slate(path: &str) -> Result<Slate> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fixtures from {}", path))?;
    let slate = parse_slate(&json).with_context(|| format!("Invalid fixtures in {}", path))?;
    info!("Loaded {} match(es) from {}", slate.len(), path);
    Ok(slate)
}

/// Parse a JSON fixture document. Any shape error rejects the whole document.
pub fn parse_slate(json: &str) -> Result<Slate> {
    let raw: RawSlate = serde_json::from_str(json).context("Failed to parse fixture JSON")?;
    let fixtures = raw
        .matches
        .into_iter()
        .map(into_fixture)
        .collect::<Result<Vec<_>, DataError>>()?;
    debug!("Parsed {} fixture(s)", fixtures.len());
    Ok(Slate::new(fixtures)?)
}

fn into_fixture(raw: RawMatch) -> Result<MatchFixture, DataError> {
    let id = raw.match_id;
    let required = |value: Option<f64>, field: &'static str| {
        value.ok_or_else(|| DataError::MissingField {
            match_id: id.clone(),
            field,
        })
    };
    let invalid = |field: &'static str, value: &str| DataError::InvalidField {
        match_id: id.clone(),
        field,
        value: value.to_string(),
    };

    let date = NaiveDate::parse_from_str(raw.date.trim(), "%Y-%m-%d")
        .map_err(|_| invalid("date", &raw.date))?;
    let time = NaiveTime::parse_from_str(raw.time.trim(), "%H:%M")
        .map_err(|_| invalid("time", &raw.time))?;

    let home_xg = required(raw.home_expected_goals, "home_expected_goals")?;
    let away_xg = required(raw.away_expected_goals, "away_expected_goals")?;
    if home_xg < 0.0 {
        return Err(invalid("home_expected_goals", &home_xg.to_string()));
    }
    if away_xg < 0.0 {
        return Err(invalid("away_expected_goals", &away_xg.to_string()));
    }

    let outcome = raw.outcome.as_ref();
    let probabilities = OutcomeProbabilities {
        home_win: required(outcome.and_then(|o| o.home_win), "outcome.home_win")?,
        draw: required(outcome.and_then(|o| o.draw), "outcome.draw")?,
        away_win: required(outcome.and_then(|o| o.away_win), "outcome.away_win")?,
    };

    let record = MatchRecord {
        id: id.clone(),
        home_team: raw.home_team,
        away_team: raw.away_team,
        league: raw.league,
        kickoff: date.and_time(time),
        home_elo: required(raw.home_elo, "home_elo")?,
        away_elo: required(raw.away_elo, "away_elo")?,
        home_tilt: required(raw.home_tilt, "home_tilt")?,
        away_tilt: required(raw.away_tilt, "away_tilt")?,
        home_world_rank: raw.home_rank,
        away_world_rank: raw.away_rank,
        home_country_rank: raw.home_country_rank,
        away_country_rank: raw.away_country_rank,
        home_xg,
        away_xg,
    };

    let exact_scores = parse_pairs::<Scoreline>(raw.exact_scores, "exact score", &invalid)?;
    let handicaps = parse_pairs::<HandicapLine>(raw.handicaps, "handicap", &invalid)?;

    Ok(MatchFixture {
        record,
        probabilities,
        exact_scores,
        handicaps,
    })
}

fn parse_pairs<K: FromStr>(
    pairs: Vec<(String, f64)>,
    field: &'static str,
    invalid: &dyn Fn(&'static str, &str) -> DataError,
) -> Result<Distribution<K>, DataError> {
    let parsed = pairs
        .into_iter()
        .map(|(label, p)| {
            if p < 0.0 {
                return Err(invalid(field, &format!("{} ({})", label, p)));
            }
            label
                .parse::<K>()
                .map(|k| (k, p))
                .map_err(|_| invalid(field, &label))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Distribution::from_pairs(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    const MINIMAL: &str = r#"{
        "matches": [{
            "match_id": "AAA-BBB",
            "home_team": "Alpha",
            "away_team": "Beta",
            "league": "Test League",
            "date": "2025-01-04",
            "time": "15:00",
            "home_elo": 50, "away_elo": 40,
            "home_tilt": 1.5, "away_tilt": -0.5,
            "home_expected_goals": 1.1, "away_expected_goals": 0.9,
            "outcome": {"home_win": 40.0, "draw": 35.0, "away_win": 25.0},
            "exact_scores": [["1-0", 11.0], ["0-0", 10.0]],
            "handicaps": [["0", 40.0], ["-1", 18.0]]
        }]
    }"#;

    fn data_error(err: anyhow::Error) -> DataError {
        err.downcast::<DataError>().expect("expected a DataError")
    }

    #[test]
    fn builtin_slate_matches_reference_data() {
        let slate = builtin_slate().unwrap();
        let ars = slate.get("ARS-TOT").unwrap();
        assert_eq!(ars.record.home_team, "Arsenal");
        assert_eq!(ars.probabilities.home_win, 65.2);
        assert_eq!(ars.exact_scores.len(), 10);
        assert_eq!(ars.handicaps.entries()[0].label, HandicapLine(1));
        assert_eq!(
            ars.record.kickoff,
            NaiveDateTime::parse_from_str("2025-11-23 20:45", "%Y-%m-%d %H:%M").unwrap()
        );

        let elc = slate.get("ELC-RMA").unwrap();
        assert_eq!(elc.record.home_country_rank, None);
        assert_eq!(elc.record.away_world_rank, Some(1));
    }

    #[test]
    fn optional_ranks_may_be_omitted() {
        let slate = parse_slate(MINIMAL).unwrap();
        let rec = &slate.get("AAA-BBB").unwrap().record;
        assert_eq!(rec.home_world_rank, None);
        assert_eq!(rec.away_country_rank, None);
    }

    #[test]
    fn missing_elo_is_a_shape_error() {
        let json = MINIMAL.replace(r#""home_elo": 50, "#, "");
        let err = data_error(parse_slate(&json).unwrap_err());
        assert_eq!(
            err,
            DataError::MissingField {
                match_id: "AAA-BBB".into(),
                field: "home_elo",
            }
        );
    }

    #[test]
    fn missing_outcome_block_is_a_shape_error() {
        let json = MINIMAL.replace(
            r#""outcome": {"home_win": 40.0, "draw": 35.0, "away_win": 25.0},"#,
            "",
        );
        let err = data_error(parse_slate(&json).unwrap_err());
        assert!(matches!(err, DataError::MissingField { field: "outcome.home_win", .. }));
    }

    #[test]
    fn negative_expected_goals_rejected() {
        let json = MINIMAL.replace(r#""home_expected_goals": 1.1"#, r#""home_expected_goals": -0.2"#);
        let err = data_error(parse_slate(&json).unwrap_err());
        assert!(matches!(err, DataError::InvalidField { field: "home_expected_goals", .. }));
    }

    #[test]
    fn bad_labels_are_invalid_fields() {
        let json = MINIMAL.replace(r#"["1-0", 11.0]"#, r#"["one-nil", 11.0]"#);
        let err = data_error(parse_slate(&json).unwrap_err());
        assert_eq!(
            err,
            DataError::InvalidField {
                match_id: "AAA-BBB".into(),
                field: "exact score",
                value: "one-nil".into(),
            }
        );

        let json = MINIMAL.replace(r#""time": "15:00""#, r#""time": "3pm""#);
        let err = data_error(parse_slate(&json).unwrap_err());
        assert!(matches!(err, DataError::InvalidField { field: "time", .. }));
    }

    #[test]
    fn negative_distribution_probabilities_rejected() {
        let json = MINIMAL.replace(r#"["1-0", 11.0]"#, r#"["1-0", -5.0]"#);
        let err = data_error(parse_slate(&json).unwrap_err());
        assert!(matches!(err, DataError::InvalidField { field: "exact score", .. }));

        let json = MINIMAL.replace(r#"["-1", 18.0]"#, r#"["-1", -0.1]"#);
        let err = data_error(parse_slate(&json).unwrap_err());
        assert!(matches!(err, DataError::InvalidField { field: "handicap", .. }));
    }

    #[test]
    fn pair_order_is_preserved() {
        let slate = parse_slate(MINIMAL).unwrap();
        let scores: Vec<String> = slate.get("AAA-BBB").unwrap().exact_scores.entries()
            .iter()
            .map(|w| w.label.to_string())
            .collect();
        assert_eq!(scores, ["1-0", "0-0"]);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_slate("/nonexistent/fixtures.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/fixtures.json"));
    }
}
