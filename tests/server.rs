mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use common::{repo, MockGitHub};
use github_battle::error::GitHubBattleError;
use github_battle::server::{router, start_server, AppState, HealthResponse, PopularResponse};
use github_battle::{LanguageKey, LanguageRepoCache, PlayerResult};
use std::sync::Arc;
use tower::ServiceExt;

async fn test_state(api: MockGitHub) -> (AppState, Arc<MockGitHub>) {
    let api = Arc::new(api);
    let cache = LanguageRepoCache::spawn(api.clone()).await.expect("Failed to spawn cache");
    let state = AppState {
        api: api.clone(),
        cache,
        start_time: std::time::Instant::now(),
    };
    (state, api)
}

async fn get(state: AppState, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn test_health_reports_cache_stats() {
    let (state, _) = test_state(MockGitHub::new()).await;

    let (status, body) = get(state, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let health: HealthResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.cache.unwrap().fetches_issued, 0);
}

#[tokio::test]
async fn test_battle_endpoint_returns_ranked_pair() {
    let (state, _) = test_state(
        MockGitHub::new()
            .with_user("tyler", 10, &[5])
            .with_user("dan", 1, &[2]),
    )
    .await;

    let (status, body) = get(state, "/battle?player_one=dan&player_two=tyler").await;

    assert_eq!(status, StatusCode::OK);
    let ranked: Vec<PlayerResult> = serde_json::from_slice(&body).unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].profile.login, "tyler");
    assert_eq!(ranked[0].score, 35);
    assert_eq!(ranked[1].score, 5);
}

#[tokio::test]
async fn test_battle_endpoint_unknown_user_is_404() {
    let (state, _) = test_state(MockGitHub::new().with_user("tyler", 10, &[5])).await;

    let (status, body) = get(state, "/battle?player_one=tyler&player_two=ghost").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "ghost doesn't exist");
}

#[tokio::test]
async fn test_popular_endpoint_defaults_to_all_and_caches() {
    let (state, api) = test_state(
        MockGitHub::new().with_search(
            LanguageKey::All,
            vec![repo("freeCodeCamp", "freeCodeCamp", 400_000, None)],
        ),
    )
    .await;

    let (status, body) = get(state.clone(), "/popular").await;
    assert_eq!(status, StatusCode::OK);
    let popular: PopularResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(popular.language, LanguageKey::All);
    assert_eq!(popular.repos[0].name, "freeCodeCamp");

    let (status, _) = get(state.clone(), "/popular?language=All").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(api.search_calls(), 1);

    state.cache.shutdown();
}

#[tokio::test]
async fn test_popular_endpoint_fetch_failure_is_502() {
    let (state, _) = test_state(MockGitHub::new().failing_search(LanguageKey::Java, 1)).await;

    let (status, body) = get(state, "/popular?language=Java").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "There was an error fetching the repositories");
}

#[tokio::test]
async fn test_popular_endpoint_rejects_unknown_language() {
    let (state, _) = test_state(MockGitHub::new()).await;

    let (status, body) = get(state.clone(), "/popular?language=Haskell").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "Unknown language: Haskell");

    let (status, _) = get(state, "/popular?language=css").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_start_server_reports_port_in_use() {
    let (state, _) = test_state(MockGitHub::new()).await;
    let taken = std::net::TcpListener::bind("0.0.0.0:0").unwrap();
    let port = taken.local_addr().unwrap().port();

    let result = start_server(state.clone(), port).await;

    match result {
        Err(GitHubBattleError::IoError(e)) => {
            assert_eq!(e.kind(), std::io::ErrorKind::AddrInUse)
        }
        other => panic!("Expected IoError, got: {:?}", other.map(|_| ())),
    }

    state.cache.shutdown();
}
