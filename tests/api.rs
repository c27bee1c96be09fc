//! End-to-end tests of the HTTP surface over the in-memory store.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use catalog_api::{app, AppState, MemoryStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn router() -> Router {
    app(AppState::new(Arc::new(MemoryStore::new())), true)
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

async fn create_artist(router: &Router, name: &str, genre: &str) -> String {
    let (status, body) = post(router, "/artists", json!({"name": name, "bio": "Test Bio", "genre": genre})).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn create_release(router: &Router, artist_id: &str, genre: &str, status: &str) -> String {
    let (code, body) = post(
        router,
        "/releases",
        json!({
            "title": "Test Release",
            "release_date": "2025-03-15",
            "status": status,
            "genre": genre,
            "artist_id": artist_id
        }),
    )
    .await;
    assert_eq!(code, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

fn ids(body: &Value) -> Vec<String> {
    let mut out: Vec<String> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect();
    out.sort();
    out
}

#[tokio::test]
async fn root_reports_success() {
    let (status, body) = get(&router(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));
}

#[tokio::test]
async fn created_artist_echoes_input() {
    let router = router();
    let input = json!({"name": " Test Artist ", "bio": "Test Bio", "genre": "Indie"});
    let (status, body) = post(&router, "/artists", input.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], "artist_1");
    assert_eq!(body["name"], input["name"]);
    assert_eq!(body["bio"], input["bio"]);
    assert_eq!(body["genre"], input["genre"]);
}

#[tokio::test]
async fn artist_with_missing_or_blank_field_is_rejected() {
    let router = router();
    for input in [
        json!({"bio": "b", "genre": "g"}),
        json!({"name": "n", "bio": "", "genre": "g"}),
        json!({"name": "n", "bio": "b", "genre": "  "}),
    ] {
        let (status, body) = post(&router, "/artists", input).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "All fields (name, bio, genre) are required");
    }
    let (_, all) = get(&router, "/artists").await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let router = router();
    let request = Request::post("/artists")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _) = send(&router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn repeated_query_parameter_is_a_json_bad_request() {
    let router = router();
    for uri in ["/artists?genre=a&genre=b", "/releases?status=x&status=y"] {
        let (status, body) = get(&router, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["error"].as_str().unwrap().starts_with("bad request: "), "{}", uri);
    }
}

#[tokio::test]
async fn ids_compare_numerically() {
    let router = router();
    for n in 1..=10 {
        let id = create_artist(&router, &format!("Artist {}", n), "Rock").await;
        assert_eq!(id, format!("artist_{}", n));
    }
    assert_eq!(create_artist(&router, "Artist 11", "Rock").await, "artist_11");
}

#[tokio::test]
async fn artist_filters_ignore_case_and_combine() {
    let router = router();
    let indie = create_artist(&router, "Test Artist", "Indie").await;
    let other = create_artist(&router, "Test Artist2", "Soundtrack").await;

    let (status, body) = get(&router, "/artists?genre=INDIE").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![indie.clone()]);

    let (_, body) = get(&router, "/artists?name=test%20artist2").await;
    assert_eq!(ids(&body), vec![other]);

    let (_, body) = get(&router, "/artists?genre=indie&name=Test%20Artist2").await;
    assert_eq!(body, json!([]));

    let (_, body) = get(&router, "/artists?genre=").await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn release_for_unknown_artist_is_not_found() {
    let router = router();
    let (status, body) = post(
        &router,
        "/releases",
        json!({
            "title": "Orphan",
            "release_date": "2025-03-15",
            "status": "published",
            "genre": "Rock",
            "artist_id": "artist_99"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Artist with id 'artist_99' does not exist");
    let (_, all) = get(&router, "/releases").await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn release_with_missing_field_is_rejected() {
    let router = router();
    let artist = create_artist(&router, "A", "Rock").await;
    let (status, _) = post(
        &router,
        "/releases",
        json!({"title": "T", "status": "published", "genre": "Rock", "artist_id": artist}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn created_release_echoes_input() {
    let router = router();
    let artist = create_artist(&router, "A", "Rock").await;
    let input = json!({
        "title": "Test Release",
        "release_date": "2025-03-15",
        "status": "published",
        "genre": "Rock",
        "artist_id": artist
    });
    let (status, body) = post(&router, "/releases", input.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], "release_1");
    for field in ["title", "release_date", "status", "genre", "artist_id"] {
        assert_eq!(body[field], input[field], "{}", field);
    }
}

#[tokio::test]
async fn release_filters_are_conjunctive() {
    let router = router();
    let a = create_artist(&router, "Test Artist", "Indie").await;
    let b = create_artist(&router, "Test Artist2", "Soundtrack").await;
    let rock = create_release(&router, &a, "Rock", "published").await;
    let jazz = create_release(&router, &a, "Jazz", "unreleased").await;
    let other_rock = create_release(&router, &b, "Rock", "published").await;

    let (status, body) = get(&router, "/releases").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (_, body) = get(&router, &format!("/releases?artist_id={}", a)).await;
    assert_eq!(ids(&body), {
        let mut v = vec![rock.clone(), jazz.clone()];
        v.sort();
        v
    });

    let (_, body) = get(&router, "/releases?genre=Rock").await;
    assert_eq!(ids(&body), {
        let mut v = vec![rock.clone(), other_rock];
        v.sort();
        v
    });

    let (_, body) = get(&router, &format!("/releases?artist_id={}&genre=rock", a)).await;
    assert_eq!(ids(&body), vec![rock.clone()]);

    let (_, body) = get(&router, &format!("/releases?artist_id={}&genre=jazz", a)).await;
    assert_eq!(ids(&body), vec![jazz]);

    let (_, body) = get(&router, &format!("/releases?artist_id={}&status=PUBLISHED", a)).await;
    assert_eq!(ids(&body), vec![rock]);

    // artist_id is an exact match.
    let (_, body) = get(&router, &format!("/releases?artist_id={}", a.to_uppercase())).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn cleanup_then_setup_restarts_numbering() {
    let router = router();
    create_artist(&router, "A", "Rock").await;
    create_artist(&router, "B", "Rock").await;

    let (status, body) = post(&router, "/test-cleanup", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));
    let (status, _) = post(&router, "/test-setup", json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let (_, all) = get(&router, "/artists").await;
    assert_eq!(all, json!([]));
    assert_eq!(create_artist(&router, "C", "Rock").await, "artist_1");
}

#[tokio::test]
async fn admin_routes_can_be_disabled() {
    let router = app(AppState::new(Arc::new(MemoryStore::new())), false);
    let (status, _) = post(&router, "/test-setup", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn readiness_reports_store_health() {
    let (status, body) = get(&router(), "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "database": "ok"}));
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = get(&router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn version_reports_package() {
    let (status, body) = get(&router(), "/version").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "catalog-api");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn concurrent_creates_get_distinct_ids() {
    let router = router();
    let mut handles = Vec::new();
    for n in 0..20 {
        let router = router.clone();
        handles.push(tokio::spawn(async move {
            create_artist(&router, &format!("Artist {}", n), "Rock").await
        }));
    }
    let mut created = Vec::new();
    for h in handles {
        created.push(h.await.unwrap());
    }
    created.sort();
    created.dedup();
    assert_eq!(created.len(), 20);
}
