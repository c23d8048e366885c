use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use tokio::{net::TcpListener, sync::Mutex};
use trackmerge::config::ClientConfig;
use trackmerge::error::ApiError;
use trackmerge::spotify::SpotifyClient;
use trackmerge::sync::PlaylistApi;
use trackmerge::types::TrackId;

const TOKEN: &str = "test-token";
const PLAYLIST: &str = "37i9dQZF1DXcBWIGoYBM5M";
const ID_A: &str = "4uLU6hMCjMI75M1A2tKUQC";

#[derive(Default)]
struct MockState {
    rate_limited_reads: AtomicUsize,
    fail_adds: bool,
    queries: Mutex<Vec<HashMap<String, String>>>,
    added: Mutex<Vec<Value>>,
}

async fn get_tracks(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if state.rate_limited_reads.load(Ordering::SeqCst) > 0 {
        state.rate_limited_reads.fetch_sub(1, Ordering::SeqCst);
        return (StatusCode::TOO_MANY_REQUESTS, [("retry-after", "0")]).into_response();
    }

    state.queries.lock().await.push(query);
    assert_eq!(id, PLAYLIST);

    Json(json!({
        "items": [
            { "track": { "id": ID_A } },
            { "track": { "id": null } },
            { "track": null }
        ],
        "total": 3
    }))
    .into_response()
}

async fn add_tracks(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if state.fail_adds {
        return (StatusCode::INTERNAL_SERVER_ERROR, "server error").into_response();
    }

    state.added.lock().await.push(body);
    (StatusCode::CREATED, Json(json!({ "snapshot_id": "snap" }))).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

// Starts the mock API on a free local port and returns a client pointed at it
async fn mock_api(state: Arc<MockState>) -> SpotifyClient {
    let app = Router::new()
        .route("/playlists/{id}/tracks", get(get_tracks).post(add_tracks))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await });

    SpotifyClient::new(ClientConfig::new(format!("http://{addr}/"), TOKEN))
}

#[tokio::test]
async fn test_tracks_page_skips_missing_ids() {
    let state = Arc::new(MockState::default());
    let client = mock_api(Arc::clone(&state)).await;

    let page = client.tracks_page(PLAYLIST, 100, 50).await.unwrap();

    assert_eq!(page.total, 3);
    assert_eq!(page.track_ids, vec![TrackId::parse(ID_A).unwrap()]);

    let queries = state.queries.lock().await;
    assert_eq!(queries[0].get("offset").map(String::as_str), Some("100"));
    assert_eq!(queries[0].get("limit").map(String::as_str), Some("50"));
}

#[tokio::test]
async fn test_rate_limit_is_retried() {
    let state = Arc::new(MockState {
        rate_limited_reads: AtomicUsize::new(2),
        ..Default::default()
    });
    let client = mock_api(Arc::clone(&state)).await;

    let page = client.tracks_page(PLAYLIST, 0, 100).await.unwrap();

    assert_eq!(page.track_ids.len(), 1);
    assert_eq!(state.rate_limited_reads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_rate_limit_gives_up() {
    let state = Arc::new(MockState {
        rate_limited_reads: AtomicUsize::new(10),
        ..Default::default()
    });
    let client = mock_api(Arc::clone(&state)).await;

    let result = client.tracks_page(PLAYLIST, 0, 100).await;

    assert!(matches!(result, Err(ApiError::RateLimited { .. })));
    // One attempt plus three retries
    assert_eq!(state.rate_limited_reads.load(Ordering::SeqCst), 6);
}

#[tokio::test]
async fn test_add_tracks_sends_uris() {
    let state = Arc::new(MockState::default());
    let client = mock_api(Arc::clone(&state)).await;

    client
        .add_tracks(PLAYLIST, &[TrackId::parse(ID_A).unwrap()])
        .await
        .unwrap();

    let added = state.added.lock().await;
    assert_eq!(added[0], json!({ "uris": [format!("spotify:track:{ID_A}")] }));
}

#[tokio::test]
async fn test_add_tracks_error_status() {
    let state = Arc::new(MockState {
        fail_adds: true,
        ..Default::default()
    });
    let client = mock_api(Arc::clone(&state)).await;

    let result = client
        .add_tracks(PLAYLIST, &[TrackId::parse(ID_A).unwrap()])
        .await;

    match result {
        Err(ApiError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "server error");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_wrong_token_is_rejected() {
    let state = Arc::new(MockState::default());
    let client = mock_api(Arc::clone(&state)).await;
    let stranger = SpotifyClient::new(ClientConfig::new(client.api_url(), "other-token"));

    let result = stranger.tracks_page(PLAYLIST, 0, 100).await;

    assert!(matches!(result, Err(ApiError::Status { status: 401, .. })));
}
