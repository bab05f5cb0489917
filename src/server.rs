use crate::actors::LanguageRepoCache;
use crate::error::GitHubBattleError;
use crate::github::GitHubApi;
use crate::models::{CacheStats, LanguageKey, PlayerResult};
use crate::score;
use crate::types::Repository;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Shared state for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn GitHubApi>,
    pub cache: LanguageRepoCache,
    pub start_time: std::time::Instant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheStats>,
}

#[derive(Debug, Deserialize)]
pub struct BattleParams {
    pub player_one: String,
    pub player_two: String,
}

// Parsed in the handler so an unknown language gets the JSON error body.
#[derive(Debug, Deserialize)]
pub struct PopularParams {
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopularResponse {
    pub language: LanguageKey,
    pub repos: Vec<Repository>,
}

impl IntoResponse for GitHubBattleError {
    fn into_response(self) -> Response {
        let status = match &self {
            GitHubBattleError::UserNotFound(_) => StatusCode::NOT_FOUND,
            GitHubBattleError::UnknownLanguage(_) => StatusCode::BAD_REQUEST,
            GitHubBattleError::RemoteError(_)
            | GitHubBattleError::NetworkError(_)
            | GitHubBattleError::JsonError(_)
            | GitHubBattleError::PopularReposUnavailable => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!(%status, "Request failed: {}", self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/battle", get(battle))
        .route("/popular", get(popular))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: AppState, port: u16) -> crate::error::Result<()> {
    let app = router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("GitHub battle server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let cache = match state.cache.stats().await {
        Ok(stats) => Some(stats),
        Err(e) => {
            warn!("Language cache not responding: {}", e);
            None
        }
    };

    let (status_code, status) = if cache.is_some() {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    let response = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        cache,
    };

    (status_code, Json(response))
}

async fn battle(
    State(state): State<AppState>,
    Query(params): Query<BattleParams>,
) -> Result<Json<[PlayerResult; 2]>, GitHubBattleError> {
    let ranked = score::battle(state.api.as_ref(), &params.player_one, &params.player_two).await?;
    Ok(Json(ranked))
}

async fn popular(
    State(state): State<AppState>,
    Query(params): Query<PopularParams>,
) -> Result<Json<PopularResponse>, GitHubBattleError> {
    let language = match params.language {
        Some(language) => language.parse::<LanguageKey>()?,
        None => LanguageKey::default(),
    };

    let repos = state.cache.select(language).await?;
    Ok(Json(PopularResponse {
        language,
        repos: repos.to_vec(),
    }))
}
