use super::helpers::{
    TrackUploadFields, admin_token, expect_status, read_json, send, spawn_app, tiny_png_bytes,
    upload_track,
};
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use uuid::Uuid;

#[tokio::test]
async fn admin_login_rejects_bad_credentials() {
    let app = spawn_app().await;

    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/admin/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "email": app.admin_email, "password": "wrong-password" }).to_string(),
        ))
        .expect("failed to build login request");
    let res = send(&app.app, req).await;
    expect_status(res, StatusCode::FORBIDDEN).await;

    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/admin/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "email": "intruder@example.com", "password": app.admin_password })
                .to_string(),
        ))
        .expect("failed to build login request");
    let res = send(&app.app, req).await;
    expect_status(res, StatusCode::FORBIDDEN).await;
}

#[tokio::test]
async fn admin_routes_require_a_token() {
    let app = spawn_app().await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/v1/admin/stats")
        .body(Body::empty())
        .expect("failed to build request");
    let res = send(&app.app, req).await;
    expect_status(res, StatusCode::UNAUTHORIZED).await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/v1/admin/stats")
        .header(header::AUTHORIZATION, "Bearer not-a-real-token")
        .body(Body::empty())
        .expect("failed to build request");
    let res = send(&app.app, req).await;
    expect_status(res, StatusCode::UNAUTHORIZED).await;
}

#[tokio::test]
async fn full_artist_flow_upload_edit_react_delete() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    // Upload with cover art
    let id = upload_track(
        &app.app,
        &token,
        &TrackUploadFields {
            title: "Smoke Test Beat",
            bpm: "128",
            music_key: "C",
            cover: Some(tiny_png_bytes()),
            ..Default::default()
        },
    )
    .await;

    // Cover made it into storage
    let req = Request::builder()
        .method("GET")
        .uri(format!("/api/v1/tracks/{}", id))
        .body(Body::empty())
        .expect("failed to build request");
    let res = send(&app.app, req).await;
    let res = expect_status(res, StatusCode::OK).await;
    let track: Value = read_json(res).await;
    assert!(
        track["cover_url"]
            .as_str()
            .is_some_and(|u| u.contains("covers/")),
        "cover_url should point at the covers storage key"
    );

    // Edit metadata, put it up for sale
    let req = Request::builder()
        .method("PATCH")
        .uri(format!("/api/v1/admin/tracks/{}", id))
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(
            json!({ "title": "Smoke Test Beat (final)", "for_sale": true, "price": 99.0 })
                .to_string(),
        ))
        .expect("failed to build request");
    let res = send(&app.app, req).await;
    let res = expect_status(res, StatusCode::OK).await;
    let updated: Value = read_json(res).await;
    assert_eq!(updated["title"].as_str(), Some("Smoke Test Beat (final)"));
    assert_eq!(updated["for_sale"].as_bool(), Some(true));
    assert_eq!(updated["bpm"].as_i64(), Some(128), "bpm should be untouched");

    // A visitor reacts
    let req = Request::builder()
        .method("PATCH")
        .uri(format!("/api/v1/tracks/{}/reactions", id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "like_delta": 1, "dislike_delta": 0 }).to_string(),
        ))
        .expect("failed to build request");
    let res = send(&app.app, req).await;
    let res = expect_status(res, StatusCode::OK).await;
    let reacted: Value = read_json(res).await;
    assert_eq!(reacted["like_count"].as_i64(), Some(1));

    // Stats see the catalog
    let req = Request::builder()
        .method("GET")
        .uri("/api/v1/admin/stats")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .expect("failed to build request");
    let res = send(&app.app, req).await;
    let res = expect_status(res, StatusCode::OK).await;
    let stats: Value = read_json(res).await;
    assert!(stats["total_tracks"].as_i64().unwrap_or(0) >= 1);
    assert!(stats["total_likes"].as_i64().unwrap_or(0) >= 1);

    // Delete and verify it is gone
    let req = Request::builder()
        .method("DELETE")
        .uri(format!("/api/v1/admin/tracks/{}", id))
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .expect("failed to build request");
    let res = send(&app.app, req).await;
    expect_status(res, StatusCode::NO_CONTENT).await;

    let req = Request::builder()
        .method("GET")
        .uri(format!("/api/v1/tracks/{}", id))
        .body(Body::empty())
        .expect("failed to build request");
    let res = send(&app.app, req).await;
    expect_status(res, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
async fn profile_update_round_trips() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    // Public profile always resolves, seeded or defaulted
    let req = Request::builder()
        .method("GET")
        .uri("/api/v1/profile")
        .body(Body::empty())
        .expect("failed to build request");
    let res = send(&app.app, req).await;
    let res = expect_status(res, StatusCode::OK).await;
    let profile: Value = read_json(res).await;
    assert!(profile["artist_name"].as_str().is_some());

    // Update text fields and blur through the admin form
    let artist_name = format!("Artist {}", Uuid::now_v7());
    let boundary = format!("----beatfolio-profile-{}", Uuid::now_v7());
    let mut body = Vec::new();
    let mut push_text = |name: &str, value: &str| {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    };
    push_text("artist_name", &artist_name);
    push_text("tagline", "late night loops");
    push_text("instagram", "@beatsmith");
    push_text("background_blur", "12");
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    let req = Request::builder()
        .method("PUT")
        .uri("/api/v1/admin/profile")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body))
        .expect("failed to build request");
    let res = send(&app.app, req).await;
    let res = expect_status(res, StatusCode::OK).await;
    let updated: Value = read_json(res).await;
    assert_eq!(updated["artist_name"].as_str(), Some(artist_name.as_str()));
    assert_eq!(updated["tagline"].as_str(), Some("late night loops"));
    assert_eq!(updated["background_blur"].as_i64(), Some(12));
    assert_eq!(
        updated["socials"]["instagram"].as_str(),
        Some("@beatsmith")
    );

    // Sticks on the public read
    let req = Request::builder()
        .method("GET")
        .uri("/api/v1/profile")
        .body(Body::empty())
        .expect("failed to build request");
    let res = send(&app.app, req).await;
    let res = expect_status(res, StatusCode::OK).await;
    let profile: Value = read_json(res).await;
    assert_eq!(profile["artist_name"].as_str(), Some(artist_name.as_str()));
}

#[tokio::test]
async fn duplicate_audio_upload_is_rejected() {
    let app = spawn_app().await;
    let token = admin_token(&app).await;

    let audio = super::helpers::unique_audio_bytes();
    let fields = TrackUploadFields {
        title: "Dup A",
        ..Default::default()
    };
    let (boundary, body) = super::helpers::multipart_track_body(&fields, &audio);
    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/admin/tracks/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body))
        .expect("failed to build upload request");
    let res = send(&app.app, req).await;
    expect_status(res, StatusCode::OK).await;

    // Same bytes again: rejected on content hash
    let (boundary, body) = super::helpers::multipart_track_body(&fields, &audio);
    let req = Request::builder()
        .method("POST")
        .uri("/api/v1/admin/tracks/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body))
        .expect("failed to build upload request");
    let res = send(&app.app, req).await;
    expect_status(res, StatusCode::BAD_REQUEST).await;
}
