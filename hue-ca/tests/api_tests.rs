//! Integration tests for hue-ca API endpoints
//!
//! Routers run against an in-memory analysis store and a temporary image
//! directory; requests go through `oneshot`.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose, Engine as _};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

use hue_ca::auth::{HeaderAuthProvider, OWNER_HEADER};
use hue_ca::{build_router, AppState};
use hue_common::store::{FsImageStore, MemoryAnalysisStore};
use hue_common::{ColorAnalyzer, ProfileRepository};

struct TestApp {
    router: Router,
    _images: TempDir,
}

/// Test helper: app backed by memory store, questionnaire-only analyzer
fn setup_app() -> TestApp {
    setup_app_with_image_limit(1024)
}

fn setup_app_with_image_limit(max_image_bytes: usize) -> TestApp {
    let images = tempfile::tempdir().unwrap();
    let state = AppState::new(
        Arc::new(ProfileRepository::new(Arc::new(MemoryAnalysisStore::new()))),
        ColorAnalyzer::questionnaire_only(),
        Arc::new(HeaderAuthProvider),
        Arc::new(FsImageStore::new(images.path())),
        max_image_bytes,
    );
    TestApp {
        router: build_router(state),
        _images: images,
    }
}

fn request(method: &str, uri: &str, owner: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(owner) = owner {
        builder = builder.header(OWNER_HEADER, owner);
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

async fn send(app: &TestApp, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.router.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Classify a winter questionnaire and store it for `owner`
async fn store_winter(app: &TestApp, owner: &str) -> Value {
    let (status, outcome) = send(
        app,
        request(
            "POST",
            "/api/classify",
            None,
            Some(json!({"answers": {"skinTone": "winter-cool", "eyeColor": "winter-icy"}})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let analysis = json!({
        "season": outcome["season"],
        "favorites": [],
        "profile": outcome["profile"],
    });
    let (status, _) = send(app, request("PUT", "/api/analysis", Some(owner), Some(analysis.clone()))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    analysis
}

// =============================================================================
// Health and classification
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app();
    let response = app.router.clone().oneshot(request("GET", "/health", None, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "hue-ca");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_classify_with_recommendation() {
    let app = setup_app();
    let body = json!({
        "answers": {
            "skinTone": "winter-cool",
            "eyeColor": "autumn-deep",
            "currentHairColor": "autumn-warm",
            "naturalHair": "no",
            "naturalHairColor": "winter-dark"
        }
    });

    let (status, outcome) = send(&app, request("POST", "/api/classify", None, Some(body))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["season"], "autumn");
    assert_eq!(outcome["method"], "questionnaire");
    assert_eq!(outcome["recommendation"]["naturalSeason"], "winter");
    assert!(outcome["profile"]["colors"]["autumn"].is_array());
}

#[tokio::test]
async fn test_classify_with_signal() {
    let app = setup_app();
    let body = json!({
        "answers": {"contrast": "high"},
        "signal": {"undertone": "cool", "intensity": 0.4, "confidence": 0.7}
    });

    let (status, outcome) = send(&app, request("POST", "/api/classify", None, Some(body))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["season"], "winter");
    assert_eq!(outcome["method"], "signal_fusion");
}

#[tokio::test]
async fn test_classify_malformed_answer_is_bad_request() {
    let app = setup_app();
    let body = json!({"answers": {"skinTone": "cool"}});

    let (status, error) = send(&app, request("POST", "/api/classify", None, Some(body))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"].is_string());
}

#[tokio::test]
async fn test_classify_rejects_oversized_image() {
    let app = setup_app();
    let image = general_purpose::STANDARD.encode(vec![0u8; 2048]);
    let body = json!({"answers": {"skinTone": "spring-warm"}, "image": image});

    let (status, _) = send(&app, request("POST", "/api/classify", None, Some(body))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_large_images_accepted_up_to_configured_limit() {
    let app = setup_app_with_image_limit(10 * 1024 * 1024);
    let image = general_purpose::STANDARD.encode(vec![7u8; 3 * 1024 * 1024]);

    let body = json!({"answers": {"skinTone": "autumn-warm"}, "image": image.clone()});
    let (status, outcome) = send(&app, request("POST", "/api/classify", None, Some(body))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["season"], "autumn");

    store_winter(&app, "big").await;
    let upload = json!({"fileName": "large.jpg", "data": image});
    let (status, stored) = send(&app, request("POST", "/api/analysis/images", Some("big"), Some(upload))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(stored["storagePath"].as_str().unwrap().ends_with("-large.jpg"));
}

#[tokio::test]
async fn test_image_over_limit_gets_json_error() {
    let app = setup_app_with_image_limit(64 * 1024);
    let upload_bytes = vec![1u8; 64 * 1024 + 1];
    store_winter(&app, "over").await;

    let upload = json!({"fileName": "x.png", "data": general_purpose::STANDARD.encode(&upload_bytes)});
    let (status, error) = send(&app, request("POST", "/api/analysis/images", Some("over"), Some(upload))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(error["error"].as_str().unwrap().contains("exceeds limit"));
}

// =============================================================================
// Profile endpoints
// =============================================================================

#[tokio::test]
async fn test_analysis_requires_owner() {
    let app = setup_app();
    let (status, error) = send(&app, request("GET", "/api/analysis", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(error["error"].as_str().unwrap().contains(OWNER_HEADER));
}

#[tokio::test]
async fn test_missing_analysis_is_not_found() {
    let app = setup_app();
    let (status, _) = send(&app, request("GET", "/api/analysis", Some("u1"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_save_load_delete() {
    let app = setup_app();
    let saved = store_winter(&app, "u1").await;

    let (status, analysis) = send(&app, request("GET", "/api/analysis", Some("u1"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(analysis, saved);
    assert!(analysis.get("ownerId").is_none());

    let (status, doc) = send(&app, request("GET", "/api/analysis/document", Some("u1"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["season"], "winter");
    assert_eq!(doc["ownerId"], "u1");
    assert!(doc["timestamp"].is_string());

    let (status, _) = send(&app, request("DELETE", "/api/analysis", Some("u1"), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, request("GET", "/api/analysis", Some("u1"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_favorites_and_colors() {
    let app = setup_app();
    store_winter(&app, "u2").await;

    let (status, fav) = send(
        &app,
        request("POST", "/api/analysis/favorites", Some("u2"), Some(json!({"hex": "#FF7F50"}))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fav["favorite"], true);

    let coral = json!({"name": "Coral", "hex": "#FF7F50"});
    let (status, added) = send(&app, request("POST", "/api/analysis/colors", Some("u2"), Some(coral))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(added["added"], true);

    let coral_lower = json!({"name": "Coral", "hex": "#ff7f50"});
    let (status, added) = send(&app, request("POST", "/api/analysis/colors", Some("u2"), Some(coral_lower))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(added["added"], false);

    let (_, removed) = send(&app, request("DELETE", "/api/analysis/colors/ff7f50", Some("u2"), None)).await;
    assert_eq!(removed["removed"], 1);
    let (status, removed) = send(&app, request("DELETE", "/api/analysis/colors/ff7f50", Some("u2"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["removed"], 0);

    // Favorite is a soft reference and survives removal
    let (_, doc) = send(&app, request("GET", "/api/analysis", Some("u2"), None)).await;
    assert_eq!(doc["favorites"], json!(["#FF7F50"]));
}

#[tokio::test]
async fn test_owners_are_isolated() {
    let app = setup_app();
    store_winter(&app, "a").await;
    store_winter(&app, "b").await;

    send(
        &app,
        request("POST", "/api/analysis/favorites", Some("a"), Some(json!({"hex": "#000000"}))),
    )
    .await;

    let (_, doc) = send(&app, request("GET", "/api/analysis", Some("b"), None)).await;
    assert_eq!(doc["favorites"], json!([]));
}

#[tokio::test]
async fn test_notes_and_combinations() {
    let app = setup_app();
    store_winter(&app, "u3").await;

    let combination = json!({"name": "Gala", "colors": ["#000000", "#FFFFFF"], "occasion": "evening"});
    let (status, _) = send(
        &app,
        request("POST", "/api/analysis/combinations", Some("u3"), Some(combination)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, note) = send(
        &app,
        request("POST", "/api/analysis/notes", Some("u3"), Some(json!({"text": "Silver suits me"}))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(note["createdBy"], "u3");
    let id = note["id"].as_str().unwrap().to_string();

    let (_, doc) = send(&app, request("GET", "/api/analysis/document", Some("u3"), None)).await;
    assert_eq!(doc["customCombinations"][0]["name"], "Gala");
    assert_eq!(doc["personalNotes"][0]["text"], "Silver suits me");

    let uri = format!("/api/analysis/notes/{}", id);
    let (_, deleted) = send(&app, request("DELETE", &uri, Some("u3"), None)).await;
    assert_eq!(deleted["deleted"], true);
    let (_, deleted) = send(&app, request("DELETE", &uri, Some("u3"), None)).await;
    assert_eq!(deleted["deleted"], false);
}

#[tokio::test]
async fn test_inspiration_images() {
    let app = setup_app();
    store_winter(&app, "u4").await;

    let upload = json!({
        "fileName": "red dress.png",
        "contentType": "image/png",
        "data": general_purpose::STANDARD.encode(b"fake png"),
    });
    let (status, image) = send(&app, request("POST", "/api/analysis/images", Some("u4"), Some(upload))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(image["storagePath"].as_str().unwrap().ends_with("-red_dress.png"));
    assert_eq!(image["caption"], "");

    let uri = format!("/api/analysis/images/{}", image["id"].as_str().unwrap());
    let (_, deleted) = send(&app, request("DELETE", &uri, Some("u4"), None)).await;
    assert_eq!(deleted["deleted"], true);
}

#[tokio::test]
async fn test_mutation_without_analysis_is_not_found() {
    let app = setup_app();
    let (status, _) = send(
        &app,
        request("POST", "/api/analysis/favorites", Some("ghost"), Some(json!({"hex": "#111111"}))),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
