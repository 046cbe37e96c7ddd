use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use vntq::api::build_router;
use vntq::error::StoreError;
use vntq::models::{Event, UpdateEvent, Venue};
use vntq::repositories::{EventRepository, EventStore, InMemoryEventRepository};
use vntq::search::Predicate;
use vntq::seed;

fn seeded_app() -> Router {
    build_router(Arc::new(InMemoryEventRepository::with_data(
        seed::venues(),
        seed::events(),
    )))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

struct DownRepository;

#[async_trait]
impl EventStore for DownRepository {
    async fn find(&self, _: &Predicate, _: u32, _: u64) -> Result<Vec<Event>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn count(&self, _: &Predicate) -> Result<i64, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn venue_by_id(&self, _: Uuid) -> Result<Option<Venue>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

#[async_trait]
impl EventRepository for DownRepository {
    async fn create(&self, _: &Event) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn get_by_id(&self, _: Uuid) -> Result<Option<Event>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn update(&self, _: Uuid, _: UpdateEvent) -> Result<Option<Event>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn create_venue(&self, _: &Venue) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn delete_venue(&self, _: Uuid) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

#[tokio::test]
async fn test_search_returns_envelope() {
    let (status, body) = send(seeded_app(), get("/api/v1/search?city=New%20York&limit=1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["limit"], 1);
    assert_eq!(body["offset"], 0);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["title"], "John Mulaney at Beacon Theatre");
}

#[tokio::test]
async fn test_search_accepts_repeated_and_comma_separated_tags() {
    let (status, body) = send(
        seeded_app(),
        get("/api/v1/search?genre=pop,stand-up&genre=indie&vibe=funny"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn test_search_lenient_paging_defaults() {
    let (status, body) = send(seeded_app(), get("/api/v1/search?limit=abc&offset=")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["limit"], 20);
    assert_eq!(body["offset"], 0);
    assert_eq!(body["total"], 5);
}

#[tokio::test]
async fn test_search_unpaired_coordinates_is_client_error() {
    let (status, body) = send(seeded_app(), get("/api/v1/search?lat=48.13")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "LAT_LNG_MUST_BE_PAIRED");
}

#[tokio::test]
async fn test_search_storage_failure_is_server_error() {
    let app = build_router(Arc::new(DownRepository));
    let (status, body) = send(app, get("/api/v1/search")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "STORAGE_UNAVAILABLE");
}

#[tokio::test]
async fn test_create_then_get_event() {
    let app = seeded_app();

    let (status, body) = send(
        app.clone(),
        json_request(
            "POST",
            "/api/v1/events",
            json!({
                "title": "Late Jazz Set",
                "start_at": "2026-09-01T02:00:00Z",
                "timezone": "America/New_York",
                "city": " New York ",
                "genre_tags": ["Jazz", "jazz"]
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["item"]["city"], "New York");
    assert_eq!(body["item"]["genre_tags"], json!(["jazz"]));
    assert_eq!(body["item"]["status"], "active");

    let id = body["item"]["id"].as_str().unwrap();
    let (status, body) = send(app.clone(), get(&format!("/api/v1/events/{}", id))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item"]["title"], "Late Jazz Set");

    let (_, body) = send(app, get("/api/v1/search?genre=jazz")).await;
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn test_create_rejects_invalid_payloads() {
    let (status, body) = send(
        seeded_app(),
        json_request(
            "POST",
            "/api/v1/events",
            json!({
                "title": "Backwards",
                "start_at": "2026-03-01T20:00:00Z",
                "end_at": "2026-03-01T19:00:00Z",
                "timezone": "UTC"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_PAYLOAD");

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/events")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(seeded_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_JSON");
}

#[tokio::test]
async fn test_patch_event() {
    let app = seeded_app();
    let id = seed::events()[0].id;

    let (status, body) = send(
        app.clone(),
        json_request(
            "PATCH",
            &format!("/api/v1/events/{}", id),
            json!({"status": "cancelled", "venue_id": null}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item"]["status"], "cancelled");
    assert_eq!(body["item"]["venue_id"], Value::Null);
    assert_eq!(body["item"]["title"], "Taylor Swift Arena Night");

    let (_, body) = send(app, get("/api/v1/search?lat=40.75&lng=-73.99&radius_km=1")).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_missing_event_is_not_found() {
    let uri = format!("/api/v1/events/{}", Uuid::new_v4());

    let (status, body) = send(seeded_app(), get(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, _) = send(seeded_app(), json_request("PATCH", &uri, json!({"title": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_reports_store_state() {
    let (status, body) = send(seeded_app(), get("/api/v1/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(build_router(Arc::new(DownRepository)), get("/api/v1/health")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["db"], "error");
}

#[tokio::test]
async fn test_patch_past_stored_end_is_conflict() {
    let app = seeded_app();
    let id = seed::events()[0].id;

    let (status, body) = send(
        app.clone(),
        json_request(
            "PATCH",
            &format!("/api/v1/events/{}", id),
            json!({"start_at": "2027-01-01T00:00:00Z"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONSTRAINT_VIOLATION");

    let (_, body) = send(app, get(&format!("/api/v1/events/{}", id))).await;
    assert_eq!(body["item"]["start_at"], "2026-06-12T00:00:00Z");
}
