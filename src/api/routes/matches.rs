use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{extract_shots, GridAggregator, MatchStatsReducer};
use crate::models::{
    team_filter, GridHistogram, LogSummary, MatchEventLog, MatchInfo, MatchStatsBundle,
    ShotMarker, StatRow, TeamDirectory,
};
use crate::storage;

// ── Shared views ────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct FixtureHeader {
    pub home_team: String,
    pub away_team: String,
    pub home_acronym: String,
    pub away_acronym: String,
    pub scoreline: String,
    pub date: String,
    pub stadium: Option<String>,
    pub match_week: Option<u32>,
}

impl FixtureHeader {
    fn new(info: &MatchInfo, teams: &TeamDirectory) -> Self {
        Self {
            home_team: info.home_team_name().to_string(),
            away_team: info.away_team_name().to_string(),
            home_acronym: teams.acronym(info.home_team_name()).to_string(),
            away_acronym: teams.acronym(info.away_team_name()).to_string(),
            scoreline: info.scoreline(),
            date: info.display_date(),
            stadium: info.stadium_name().map(str::to_string),
            match_week: info.match_week,
        }
    }
}

fn resolve_sides(
    state: &AppState,
    match_id: &str,
    log: &MatchEventLog,
    home: Option<&str>,
    away: Option<&str>,
) -> Result<(String, String), ApiError> {
    log.resolve_sides(home, away, state.fixture(match_id))
        .map_err(|e| ApiError::BadRequest(format!("{} for match {}", e, match_id)))
}

// ── List / detail ───────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MatchListItem {
    pub match_id: String,
    pub fixture: Option<FixtureHeader>,
}

#[derive(Debug, Serialize)]
pub struct MatchesResponse {
    pub matches: Vec<MatchListItem>,
}

pub async fn list_matches(
    State(state): State<AppState>,
) -> Result<Json<MatchesResponse>, ApiError> {
    let matches = storage::list_matches(&state.storage)?
        .into_iter()
        .map(|match_id| MatchListItem {
            fixture: state
                .fixture(&match_id)
                .map(|f| FixtureHeader::new(f, &state.teams)),
            match_id,
        })
        .collect();

    Ok(Json(MatchesResponse { matches }))
}

#[derive(Debug, Serialize)]
pub struct MatchDetailResponse {
    pub match_id: String,
    pub fixture: Option<FixtureHeader>,
    pub summary: LogSummary,
}

pub async fn match_detail(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
) -> Result<Json<MatchDetailResponse>, ApiError> {
    let log = state.event_log(&match_id).await?;
    let fixture = state
        .fixture(&match_id)
        .map(|f| FixtureHeader::new(f, &state.teams));

    Ok(Json(MatchDetailResponse {
        match_id,
        fixture,
        summary: log.summary(),
    }))
}

// ── Heatmap ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct HeatmapParams {
    pub team: Option<String>,
    pub event_type: Option<String>,
    pub minute: Option<i32>,
    pub flip_x: Option<bool>,
    pub cell_size: Option<f64>,
}

pub async fn heatmap(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Query(params): Query<HeatmapParams>,
) -> Result<Json<GridHistogram>, ApiError> {
    let mut grid = state.config.heatmap.base_params();
    if let Some(cell_size) = params.cell_size {
        grid = grid.with_cell_size(cell_size);
    }
    grid.validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    if let Some(team) = team_filter(params.team.as_deref()) {
        grid = grid.with_team(team);
    }
    if let Some(event_type) = params.event_type.filter(|t| !t.trim().is_empty()) {
        grid = grid.with_event_type(event_type);
    }
    if let Some(minute) = params.minute {
        grid = grid.with_minute_cutoff(minute);
    }
    grid = grid.with_flip_x(params.flip_x.unwrap_or(false));

    let log = state.event_log(&match_id).await?;
    Ok(Json(GridAggregator::aggregate(log.events(), &grid)))
}

// ── Stats ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StatsParams {
    pub home: Option<String>,
    pub away: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub home_team: String,
    pub away_team: String,
    pub stats: MatchStatsBundle,
    pub rows: Vec<StatRow>,
}

pub async fn stats(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Query(params): Query<StatsParams>,
) -> Result<Json<StatsResponse>, ApiError> {
    let log = state.event_log(&match_id).await?;
    let (home, away) = resolve_sides(
        &state,
        &match_id,
        &log,
        params.home.as_deref(),
        params.away.as_deref(),
    )?;

    let stats = MatchStatsReducer::reduce(log.events(), &home, &away);
    let rows = stats.rows();

    Ok(Json(StatsResponse {
        home_team: home,
        away_team: away,
        stats,
        rows,
    }))
}

// ── Shots ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ShotsParams {
    pub team: Option<String>,
    pub minute: Option<i32>,
    /// Team whose shots are mirrored; defaults to the away side
    pub away: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ShotView {
    #[serde(flatten)]
    pub marker: ShotMarker,
    pub is_goal: bool,
    pub colour: String,
}

#[derive(Debug, Serialize)]
pub struct ShotsResponse {
    pub shots: Vec<ShotView>,
    pub total: usize,
}

pub async fn shots(
    State(state): State<AppState>,
    Path(match_id): Path<String>,
    Query(params): Query<ShotsParams>,
) -> Result<Json<ShotsResponse>, ApiError> {
    let log = state.event_log(&match_id).await?;

    let mirror = match params.away {
        Some(team) => Some(team),
        None => resolve_sides(&state, &match_id, &log, None, None)
            .ok()
            .map(|(_, away)| away),
    };
    let team = team_filter(params.team.as_deref());

    let shots: Vec<ShotView> = extract_shots(log.events(), team.as_deref(), mirror.as_deref())
        .into_iter()
        .filter(|s| params.minute.map_or(true, |m| s.visible_at(m)))
        .map(|marker| ShotView {
            is_goal: marker.is_goal(),
            colour: marker
                .team
                .as_deref()
                .map_or_else(String::new, |t| state.teams.colour(t).to_string()),
            marker,
        })
        .collect();

    Ok(Json(ShotsResponse {
        total: shots.len(),
        shots,
    }))
}
