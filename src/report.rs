//! Plain-text matchday report: per-match analysis, final predictions and an
//! executive summary.

use chrono::NaiveDate;
use std::fmt::Write;

use crate::data::models::{MatchFixture, MatchRecord};
use crate::data::Slate;
use crate::summary::{DerivedSummary, SummaryDeriver};

const RULE: &str = "==================================================";

pub fn render_report(slate: &Slate, deriver: &SummaryDeriver, date: NaiveDate) -> String {
    let summaries: Vec<(&MatchFixture, Option<DerivedSummary>)> = slate
        .fixtures()
        .iter()
        .map(|f| (f, deriver.derive(f).ok()))
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "MATCH PREDICTION REPORT");
    let _ = writeln!(out, "Date: {}", date.format("%d/%m/%Y"));
    let _ = writeln!(out, "{}", RULE);

    for (fixture, summary) in &summaries {
        write_detail(&mut out, fixture, summary.as_ref());
    }

    let _ = writeln!(out, "\nFINAL PREDICTIONS");
    let _ = writeln!(out, "{}", RULE);
    for (fixture, summary) in &summaries {
        write_prediction(&mut out, &fixture.record, summary.as_ref());
    }

    let _ = writeln!(out, "\nEXECUTIVE SUMMARY");
    let _ = writeln!(out, "{}", RULE);
    for (i, (fixture, summary)) in summaries.iter().enumerate() {
        let r = &fixture.record;
        let _ = writeln!(out, "\n{}. {} vs {}", i + 1, r.home_team, r.away_team);
        match summary {
            Some(s) => {
                let _ = writeln!(out, "   Prediction: {}", prediction_label(s));
                let _ = writeln!(out, "   Confidence: {:.1}%", s.confidence);
                let _ = writeln!(out, "   Recommendation: {}", s.recommendation.label());
            }
            None => {
                let _ = writeln!(out, "   No data");
            }
        }
    }

    let _ = writeln!(out, "\n{}", RULE);
    let _ = writeln!(
        out,
        "NOTE: predictions are statistical estimates. Football is unpredictable."
    );
    out
}

fn prediction_label(s: &DerivedSummary) -> String {
    match s.predicted_winner() {
        Some(team) => format!("{} win", team),
        None => "Draw".to_string(),
    }
}

fn write_detail(out: &mut String, fixture: &MatchFixture, summary: Option<&DerivedSummary>) {
    let r = &fixture.record;
    let _ = writeln!(out, "\nDETAILED ANALYSIS: {} vs {}", r.home_team, r.away_team);
    let _ = writeln!(out, "{}", "-".repeat(60));
    let _ = writeln!(
        out,
        "League: {} | Kickoff: {}",
        r.league,
        r.kickoff.format("%Y-%m-%d %H:%M")
    );
    let _ = writeln!(
        out,
        "ELO: {} ({}) vs {} ({})",
        r.home_team, r.home_elo, r.away_team, r.away_elo
    );
    let _ = writeln!(
        out,
        "Offensive tilt: {} ({}%) vs {} ({}%)",
        r.home_team, r.home_tilt, r.away_team, r.away_tilt
    );

    let Some(s) = summary else {
        let _ = writeln!(out, "No data");
        return;
    };

    let _ = writeln!(
        out,
        "Main prediction: {} ({:.1}% probability)",
        prediction_label(s),
        s.confidence
    );
    let _ = writeln!(
        out,
        "Expected goals: {} ({:.2}) - {} ({:.2})",
        r.home_team, r.home_xg, r.away_team, r.away_xg
    );
    let _ = writeln!(out, "Most likely scores:");
    for w in &s.top_scores {
        let _ = writeln!(out, "   {}: {}%", w.label, w.probability);
    }
    let _ = writeln!(out, "Handicap lines:");
    for w in fixture.handicaps.entries() {
        let _ = writeln!(out, "   Handicap {}: {}%", w.label, w.probability);
    }
}

fn write_prediction(out: &mut String, r: &MatchRecord, summary: Option<&DerivedSummary>) {
    let _ = writeln!(out, "\n{} vs {}", r.home_team, r.away_team);
    let Some(s) = summary else {
        let _ = writeln!(out, "   No data");
        return;
    };
    let _ = writeln!(
        out,
        "   {} ({:.1}% confidence, {})",
        prediction_label(s).to_uppercase(),
        s.confidence,
        s.confidence_tier.as_str()
    );
    let _ = writeln!(
        out,
        "   Goal expectation: {} ({:.2} total goals)",
        s.goal_expectation.as_str(),
        s.total_xg
    );
    let _ = writeln!(out, "   Recommendation: {}", s.recommendation.label());
    let _ = writeln!(
        out,
        "   Most probable exact score: {} ({}%)",
        s.most_probable_score.label, s.most_probable_score.probability
    );
}
