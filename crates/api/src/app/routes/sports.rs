use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Value, json};

use ledgerdesk_sports::{DEFAULT_SEASON, LEAGUES, SportsClient};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/standings/:league_id", get(standings))
        .route("/api/matches/:league_id", get(matches))
        .route("/api/leagues", get(leagues))
        .route("/api/match-report", post(match_report))
        .route("/api/test", get(test_connection))
}

pub async fn index() -> axum::response::Response {
    (
        StatusCode::OK,
        Json(json!({
            "message": "Sports stats API proxy",
            "status": "running",
            "endpoints": {
                "standings": "/api/standings/{league_id}?season=2023",
                "matches": "/api/matches/{league_id}?season=2023&last=10",
                "leagues": "/api/leagues",
                "match_report": "/api/match-report",
                "test": "/api/test",
                "health": "/health",
            },
        })),
    )
        .into_response()
}

pub async fn standings(
    Extension(client): Extension<Arc<SportsClient>>,
    Path(league_id): Path<u32>,
    Query(q): Query<dto::StandingsQuery>,
) -> axum::response::Response {
    match client.standings(league_id, q.season).await {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => errors::upstream_error_to_response(e),
    }
}

pub async fn matches(
    Extension(client): Extension<Arc<SportsClient>>,
    Path(league_id): Path<u32>,
    Query(q): Query<dto::MatchesQuery>,
) -> axum::response::Response {
    match client.fixtures(league_id, q.season, q.last).await {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => errors::upstream_error_to_response(e),
    }
}

pub async fn leagues() -> axum::response::Response {
    (
        StatusCode::OK,
        Json(json!({
            "leagues": LEAGUES,
            "sport": ledgerdesk_sports::leagues::SPORT,
            "season": DEFAULT_SEASON,
        })),
    )
        .into_response()
}

/// Echoes the submitted report; nothing is stored.
pub async fn match_report(Json(report): Json<Value>) -> axum::response::Response {
    tracing::info!("match report received");
    (
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "message": "Match report created successfully",
            "data": report,
        })),
    )
        .into_response()
}

/// Upstream connectivity check. Always 200; failures are reported in the body.
pub async fn test_connection(
    Extension(client): Extension<Arc<SportsClient>>,
) -> axum::response::Response {
    let body = match client.status().await {
        Ok(status) => json!({ "status": "success", "api_status": status }),
        Err(e) => json!({ "status": "error", "message": e.to_string() }),
    };
    (StatusCode::OK, Json(body)).into_response()
}
