use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::Rgb;

/// Display attributes for a team. Unknown teams get the fallback values.
#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub name: String,
    pub acronym: String,
    pub colour: String,
    pub rgb: Rgb,
    pub known: bool,
}

pub async fn team_detail(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<TeamResponse>, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("team name is empty".to_string()));
    }

    let teams = &state.teams;
    Ok(Json(TeamResponse {
        acronym: teams.acronym(name).to_string(),
        colour: teams.colour(name).to_string(),
        rgb: teams.rgb(name),
        known: teams.get(name).is_some(),
        name: name.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::config::AppConfig;
    use crate::models::TeamEntry;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    fn app_with(config: AppConfig) -> axum::Router {
        build_router(AppState::load(config).unwrap())
    }

    #[tokio::test]
    async fn test_known_team() {
        let tmp = tempfile::tempdir().unwrap();
        let app = app_with(AppConfig {
            data_dir: tmp.path().to_path_buf(),
            ..Default::default()
        });

        let (status, json) = get_json(app, "/api/teams/Arsenal").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["acronym"], "ARS");
        assert_eq!(json["colour"], "#EF0107");
        assert_eq!(json["rgb"], json!({"r": 239, "g": 1, "b": 7}));
        assert_eq!(json["known"], true);
    }

    #[tokio::test]
    async fn test_unknown_team_falls_back() {
        let tmp = tempfile::tempdir().unwrap();
        let app = app_with(AppConfig {
            data_dir: tmp.path().to_path_buf(),
            ..Default::default()
        });

        let (status, json) = get_json(app, "/api/teams/Real%20Betis").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "Real Betis");
        assert_eq!(json["acronym"], "Real Betis");
        assert_eq!(json["colour"], "#000000");
        assert_eq!(json["known"], false);
    }

    #[tokio::test]
    async fn test_configured_override() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = AppConfig {
            data_dir: tmp.path().to_path_buf(),
            ..Default::default()
        };
        config.teams.insert(
            "Real Betis".to_string(),
            TeamEntry {
                acronym: Some("BET".to_string()),
                colour: Some("#00954C".to_string()),
            },
        );

        let (_, json) = get_json(app_with(config), "/api/teams/Real%20Betis").await;

        assert_eq!(json["acronym"], "BET");
        assert_eq!(json["known"], true);
    }
}
