//! Integration tests for the web API surfaces that do not depend on the
//! external metadata API.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use trendarr::api::AppState;
use trendarr::config::Config;
use trendarr::models::{ContentItem, MediaType};

async fn spawn_app() -> (Arc<AppState>, Router) {
    let db_path =
        std::env::temp_dir().join(format!("trendarr-api-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.observability.metrics_enabled = false;

    let state = trendarr::api::create_app_state_from_config(config, None)
        .await
        .expect("failed to create app state");

    let router = trendarr::api::router(state.clone()).await;
    (state, router)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body was not JSON")
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref());
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Sign in and return the session cookie.
async fn sign_in(app: &Router, uid: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/session",
            None,
            serde_json::json!({
                "uid": uid,
                "email": format!("{uid}@example.com"),
                "username": uid,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get("set-cookie")
        .expect("missing session cookie")
        .to_str()
        .unwrap();
    cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn health_endpoints_respond() {
    let (_, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(get("/api/system/health", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");

    let response = app
        .clone()
        .oneshot(get("/api/system/ready", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["ready"], true);
    assert_eq!(body["checks"]["database"], true);
}

#[tokio::test]
async fn favorites_require_a_session() {
    let (_, app) = spawn_app().await;

    let response = app.clone().oneshot(get("/api/favorites", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/favorites",
            None,
            serde_json::json!({
                "item_id": 603,
                "media_type": "movie",
                "title": "The Matrix",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn favorites_crud_flow() {
    let (_, app) = spawn_app().await;
    let cookie = sign_in(&app, "crud-user").await;

    // Add once: created.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/favorites",
            Some(&cookie),
            serde_json::json!({
                "item_id": 603,
                "media_type": "movie",
                "title": "The Matrix",
                "poster": "https://image.tmdb.org/t/p/w500/603.jpg",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["created"], true);

    // Add again: duplicate is a no-op.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/favorites",
            Some(&cookie),
            serde_json::json!({
                "item_id": 603,
                "media_type": "movie",
                "title": "The Matrix",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["created"], false);

    // Exactly one favorite.
    let response = app
        .clone()
        .oneshot(get("/api/favorites", Some(&cookie)))
        .await
        .unwrap();
    let body = body_json(response).await;
    let favorites = body["data"].as_array().unwrap();
    assert_eq!(favorites.len(), 1);
    let favorite_id = favorites[0]["id"].as_i64().unwrap();

    // Remove it.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/favorites/{favorite_id}"))
                .header("Cookie", &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get("/api/favorites", Some(&cookie)))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn sign_in_exposes_profile() {
    let (_, app) = spawn_app().await;
    let cookie = sign_in(&app, "profile-user").await;

    let response = app.clone().oneshot(get("/api/auth/me", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["uid"], "profile-user");
    assert_eq!(body["data"]["email"], "profile-user@example.com");
}

#[tokio::test]
async fn trending_reflects_seeded_counters() {
    let (state, app) = spawn_app().await;

    let five = ContentItem {
        id: 5,
        title: "Five".to_string(),
        poster_path: Some("/5.jpg".to_string()),
        vote_average: Some(7.0),
        release_date: None,
        overview: None,
        genres: vec![],
        media_type: MediaType::Movie,
    };
    let seven = ContentItem {
        id: 7,
        title: "Seven".to_string(),
        poster_path: None,
        vote_average: Some(8.0),
        release_date: None,
        overview: None,
        genres: vec![],
        media_type: MediaType::Movie,
    };

    for _ in 0..3 {
        state.store().record_search("a", &five).await.unwrap();
    }
    for _ in 0..2 {
        state.store().record_search("b", &five).await.unwrap();
    }
    for _ in 0..10 {
        state.store().record_search("c", &seven).await.unwrap();
    }

    let response = app
        .clone()
        .oneshot(get("/api/trending/movies?limit=6", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["id"], 7);
    assert_eq!(entries[0]["count"], 10);
    assert_eq!(entries[1]["id"], 5);
    assert_eq!(entries[1]["count"], 5);

    // Posterless entry gets the placeholder at the presentation boundary.
    assert_eq!(
        entries[0]["poster_url"],
        "https://placehold.co/600x400/1a1a1a/FFFFFF.png"
    );
}

#[tokio::test]
async fn select_records_counter_without_blocking() {
    let (state, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/search/select",
            None,
            serde_json::json!({
                "term": "matrix",
                "item": {
                    "id": 603,
                    "title": "The Matrix",
                    "poster_path": "/603.jpg",
                    "vote_average": 8.2,
                    "release_date": "1999-03-30",
                    "overview": null,
                    "genres": ["28"],
                    "media_type": "movie"
                }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The write is fire-and-forget; poll briefly for it to land.
    let mut counters = Vec::new();
    for _ in 0..50 {
        counters = state.store().list_counters(MediaType::Movie).await.unwrap();
        if !counters.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    assert_eq!(counters.len(), 1);
    assert_eq!(counters[0].content_id, Some(603));
    assert_eq!(counters[0].count, 1);
}
