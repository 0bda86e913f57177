use super::helpers::{
    TrackUploadFields, admin_token, expect_status, read_json, send, spawn_app, upload_track,
};
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use beatfolio_api::application::interaction_ledger::use_case::InteractionLedger;
use beatfolio_api::domain::reaction::ledger::Reaction;
use beatfolio_api::infrastructure::ledger::http_reaction_sync::HttpReactionSync;
use beatfolio_api::infrastructure::ledger::json_reaction_store::JsonFileReactionStore;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::time::{Duration, sleep};
use uuid::Uuid;

async fn patch_reactions(
    app: &axum::Router,
    id: &str,
    like_delta: i32,
    dislike_delta: i32,
) -> axum::response::Response {
    let req = Request::builder()
        .method("PATCH")
        .uri(format!("/api/v1/tracks/{}/reactions", id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "like_delta": like_delta, "dislike_delta": dislike_delta }).to_string(),
        ))
        .expect("failed to build reactions request");
    send(app, req).await
}

#[tokio::test]
async fn patch_applies_marginal_deltas() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;
    let id = upload_track(&app.app, &token, &TrackUploadFields::default()).await;

    // Like arrives
    let res = patch_reactions(&app.app, &id, 1, 0).await;
    let res = expect_status(res, StatusCode::OK).await;
    let payload: Value = read_json(res).await;
    assert_eq!(payload["like_count"].as_i64(), Some(1));
    assert_eq!(payload["dislike_count"].as_i64(), Some(0));

    // Swap: like withdrawn, dislike added, one call
    let res = patch_reactions(&app.app, &id, -1, 1).await;
    let res = expect_status(res, StatusCode::OK).await;
    let payload: Value = read_json(res).await;
    assert_eq!(payload["like_count"].as_i64(), Some(0));
    assert_eq!(payload["dislike_count"].as_i64(), Some(1));

    // Dislike withdrawn
    let res = patch_reactions(&app.app, &id, 0, -1).await;
    let res = expect_status(res, StatusCode::OK).await;
    let payload: Value = read_json(res).await;
    assert_eq!(payload["like_count"].as_i64(), Some(0));
    assert_eq!(payload["dislike_count"].as_i64(), Some(0));
}

#[tokio::test]
async fn patch_clamps_counters_at_zero() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;
    let id = upload_track(&app.app, &token, &TrackUploadFields::default()).await;

    let res = patch_reactions(&app.app, &id, -5, -3).await;
    let res = expect_status(res, StatusCode::OK).await;
    let payload: Value = read_json(res).await;
    assert_eq!(payload["like_count"].as_i64(), Some(0));
    assert_eq!(payload["dislike_count"].as_i64(), Some(0));
}

#[tokio::test]
async fn patch_unknown_track_returns_404() {
    let app = spawn_app().await;
    let res = patch_reactions(&app.app, &Uuid::now_v7().to_string(), 1, 0).await;
    expect_status(res, StatusCode::NOT_FOUND).await;
}

/// Drives the real visitor-side ledger (file-backed store, fire-and-forget
/// HTTP sync) against a live instance of this API and waits for the
/// authoritative counters to converge.
#[tokio::test]
async fn ledger_reconciles_against_live_counter_endpoint() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;
    let track_id = upload_track(&app.app, &token, &TrackUploadFields::default()).await;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind listener");
    let addr = listener.local_addr().expect("missing local addr");
    let router = app.app.clone();
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });

    let base_url = format!("http://{}", addr);
    let store_path = std::env::temp_dir()
        .join(format!("beatfolio-it-{}", Uuid::now_v7()))
        .join(JsonFileReactionStore::DEFAULT_FILE_NAME);
    let mut ledger = InteractionLedger::new(
        Box::new(JsonFileReactionStore::new(store_path)),
        Arc::new(HttpReactionSync::new(base_url.clone())),
    );

    // Local state flips immediately and optimistically.
    ledger.toggle_like(&track_id);
    assert_eq!(ledger.get_reaction(&track_id), Some(Reaction::Liked));
    assert_eq!(ledger.display_count(&track_id, 0, 0), (1, 0));

    wait_for_counts(&base_url, &track_id, 1, 0).await;

    // Swap to dislike: the marginal {-1, +1} converges the server too.
    ledger.toggle_dislike(&track_id);
    assert_eq!(ledger.get_reaction(&track_id), Some(Reaction::Disliked));

    wait_for_counts(&base_url, &track_id, 0, 1).await;
}

async fn wait_for_counts(base_url: &str, track_id: &str, like: i64, dislike: i64) {
    for _ in 0..50 {
        let url = format!("{}/api/v1/tracks/{}", base_url, track_id);
        if let Ok(res) = reqwest::get(&url).await {
            if let Ok(payload) = res.json::<Value>().await {
                if payload["like_count"].as_i64() == Some(like)
                    && payload["dislike_count"].as_i64() == Some(dislike)
                {
                    return;
                }
            }
        }
        sleep(Duration::from_millis(100)).await;
    }
    panic!(
        "counters for {} never reached ({}, {})",
        track_id, like, dislike
    );
}
