use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::data::models::{ComparisonRow, HandicapLine, MatchFixture, MatchRecord, Scoreline, Weighted};
use crate::data::Slate;
use crate::error::DataError;
use crate::summary::{filter_by_confidence, DerivedSummary, SummaryDeriver};

/// Number of exact scores in the score view when no limit is given.
const DEFAULT_SCORE_LIMIT: usize = 10;

#[derive(Clone)]
pub struct AppState {
    pub slate: Arc<Slate>,
    pub deriver: SummaryDeriver,
    /// Defaults for `/api/summaries` when the query leaves them out
    pub min_confidence: f64,
    pub high_only: bool,
}

type ApiError = (StatusCode, String);

/// Build the Axum router for the dashboard.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/matches", get(matches_handler))
        .route("/api/summaries", get(summaries_handler))
        .route("/api/matches/:id/summary", get(summary_handler))
        .route("/api/matches/:id/scores", get(scores_handler))
        .route("/api/matches/:id/handicaps", get(handicaps_handler))
        .route("/api/comparison", get(comparison_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    pub min_confidence: Option<f64>,
    pub high_only: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScoreQuery {
    pub limit: Option<usize>,
}

fn find<'a>(state: &'a AppState, id: &str) -> Result<&'a MatchFixture, ApiError> {
    state
        .slate
        .get(id)
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("unknown match {}", id)))
}

fn unprocessable(e: DataError) -> ApiError {
    (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
}

async fn index_handler() -> impl IntoResponse {
    Html(DASHBOARD_HTML)
}

/// GET /api/matches
async fn matches_handler(State(state): State<Arc<AppState>>) -> Json<Vec<MatchRecord>> {
    Json(state.slate.records())
}

/// GET /api/summaries?min_confidence=60&high_only=true
async fn summaries_handler(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SummaryQuery>,
) -> Json<Vec<DerivedSummary>> {
    let summaries = state
        .slate
        .fixtures()
        .iter()
        .filter_map(|f| match state.deriver.derive(f) {
            Ok(s) => Some(s),
            Err(e) => {
                warn!("Skipping summary: {}", e);
                None
            }
        })
        .collect();
    Json(filter_by_confidence(
        summaries,
        q.min_confidence.unwrap_or(state.min_confidence),
        q.high_only.unwrap_or(state.high_only),
    ))
}

/// GET /api/matches/:id/summary
async fn summary_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DerivedSummary>, ApiError> {
    let fixture = find(&state, &id)?;
    state.deriver.derive(fixture).map(Json).map_err(unprocessable)
}

/// GET /api/matches/:id/scores?limit=10
async fn scores_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(q): Query<ScoreQuery>,
) -> Result<Json<Vec<Weighted<Scoreline>>>, ApiError> {
    let fixture = find(&state, &id)?;
    state
        .deriver
        .ranked_scores(fixture, q.limit.unwrap_or(DEFAULT_SCORE_LIMIT))
        .map(Json)
        .map_err(unprocessable)
}

/// GET /api/matches/:id/handicaps
async fn handicaps_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Weighted<HandicapLine>>>, ApiError> {
    let fixture = find(&state, &id)?;
    state
        .deriver
        .ranked_handicaps(fixture)
        .map(Json)
        .map_err(unprocessable)
}

/// GET /api/comparison
async fn comparison_handler(State(state): State<Arc<AppState>>) -> Json<Vec<ComparisonRow>> {
    Json(state.slate.comparison())
}

/// Embedded single-file dashboard (HTML + CSS + JS)
const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Matchday Predictions</title>
<style>
  :root { --bg: #0f1117; --card: #1a1d27; --border: #2a2d3a; --accent: #6c63ff; --text: #e0e0e0; --muted: #8888aa; }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; }
  header { padding: 1rem 2rem; border-bottom: 1px solid var(--border); }
  header h1 { font-size: 1.4rem; font-weight: 700; }
  main { padding: 1.5rem 2rem; display: grid; gap: 1.5rem; }
  .panel { background: var(--card); border: 1px solid var(--border); border-radius: 10px; overflow: hidden; }
  .panel-header { padding: .9rem 1.2rem; border-bottom: 1px solid var(--border); font-weight: 600; }
  table { width: 100%; border-collapse: collapse; }
  th { padding: .7rem 1rem; text-align: left; font-size: .75rem; text-transform: uppercase; color: var(--muted); border-bottom: 1px solid var(--border); }
  td { padding: .65rem 1rem; font-size: .88rem; border-bottom: 1px solid #1e2130; }
  .empty { color: var(--muted); text-align: center; padding: 2rem; }
</style>
</head>
<body>
<header><h1>Matchday Predictions</h1></header>
<main>
  <div class="panel">
    <div class="panel-header">Predictions</div>
    <table>
      <thead><tr><th>Match</th><th>League</th><th>Prediction</th><th>Confidence</th><th>Tier</th><th>Goals</th><th>Top Scores</th><th>Handicap</th></tr></thead>
      <tbody id="summaries-tbody"><tr><td colspan="8" class="empty">Loading…</td></tr></tbody>
    </table>
  </div>
  <div class="panel">
    <div class="panel-header">Comparison</div>
    <table>
      <thead><tr><th>Match</th><th>Home / Draw / Away</th><th>ELO</th><th>xG</th><th>Tilt</th></tr></thead>
      <tbody id="comparison-tbody"><tr><td colspan="5" class="empty">Loading…</td></tr></tbody>
    </table>
  </div>
</main>
<script>
const pct = v => v.toFixed(1) + '%';
const esc = v => String(v).replace(/[&<>"']/g, ch => ({'&':'&amp;','<':'&lt;','>':'&gt;','"':'&quot;',"'":'&#39;'}[ch]));

async function loadSummaries() {
  const r = await fetch('/api/summaries');
  if (!r.ok) return;
  const rows = await r.json();
  const tbody = document.getElementById('summaries-tbody');
  if (!rows.length) { tbody.innerHTML = '<tr><td colspan="8" class="empty">No matches</td></tr>'; return; }
  tbody.innerHTML = rows.map(s => `<tr>
    <td>${esc(s.home_team)} vs ${esc(s.away_team)}</td>
    <td>${esc(s.league)}</td>
    <td>${s.outcome}</td>
    <td>${pct(s.confidence)}</td>
    <td>${s.confidence_tier}</td>
    <td>${s.goal_expectation} (${s.total_xg.toFixed(2)})</td>
    <td>${s.top_scores.map(w => w.label + ' ' + pct(w.probability)).join(', ')}</td>
    <td>${s.top_handicap.label} ${pct(s.top_handicap.probability)}</td>
  </tr>`).join('');
}

async function loadComparison() {
  const r = await fetch('/api/comparison');
  if (!r.ok) return;
  const rows = await r.json();
  document.getElementById('comparison-tbody').innerHTML = rows.map(c => `<tr>
    <td>${esc(c.home_team)} vs ${esc(c.away_team)}</td>
    <td>${pct(c.home_win)} / ${pct(c.draw)} / ${pct(c.away_win)}</td>
    <td>${c.home_elo} – ${c.away_elo}</td>
    <td>${c.home_xg.toFixed(2)} – ${c.away_xg.toFixed(2)}</td>
    <td>${c.home_tilt}% – ${c.away_tilt}%</td>
  </tr>`).join('');
}

loadSummaries();
loadComparison();
</script>
</body>
</html>"#;
