//! End-to-end tests driving the REST router over the in-memory store.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, TimeZone, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

use devevent::api;
use devevent::app_state::AppState;
use devevent::domain::SteppingClock;
use devevent::persistence::{MemoryStore, StoreBackend};
use devevent::service::similarity::DEFAULT_SIMILAR_LIMIT;

fn app() -> Router {
    let store = Arc::new(StoreBackend::Memory(MemoryStore::new()));
    let start = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap();
    let clock = Arc::new(SteppingClock::new(start, Duration::seconds(1)));
    api::build_router().with_state(AppState::new(store, clock, DEFAULT_SIMILAR_LIMIT))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn event_body(slug: &str, tags: &[&str]) -> Value {
    json!({
        "title": format!("Event {slug}"),
        "slug": slug,
        "location": "Berlin",
        "image": "https://cdn.example.com/event.png",
        "date": "2026-05-01",
        "time": "09:00",
        "price": 1500,
        "capacity": 10,
        "tags": tags,
    })
}

fn booking_body(seats: i32) -> Value {
    json!({
        "user_name": "Ada",
        "user_email": "ada@example.com",
        "number_of_seats": seats,
    })
}

#[tokio::test]
async fn health_reports_healthy() {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn create_and_fetch_event_with_normalized_slug() {
    let app = app();
    let (status, created) = send(
        &app,
        "POST",
        "/api/v1/events",
        Some(event_body("  RustConf ", &["Rust", "rust", " Systems "])),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["slug"], "rustconf");
    assert_eq!(created["available_seats"], 10);
    assert_eq!(created["tags"], json!(["rust", "systems"]));

    let (status, fetched) = send(&app, "GET", "/api/v1/events/RUSTCONF", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], created["id"]);
}

#[tokio::test]
async fn duplicate_slug_is_conflict() {
    let app = app();
    let (status, _) = send(&app, "POST", "/api/v1/events", Some(event_body("dup", &[]))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/api/v1/events", Some(event_body("DUP", &[]))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], 2003);
}

#[tokio::test]
async fn invalid_event_is_bad_request() {
    let app = app();
    let mut body = event_body("bad", &[]);
    body["title"] = json!("   ");
    let (status, body) = send(&app, "POST", "/api/v1/events", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1001);
}

#[tokio::test]
async fn unknown_event_and_booking_are_not_found() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/v1/events/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 2001);

    let uri = format!("/api/v1/bookings/{}", uuid::Uuid::new_v4());
    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 2002);

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/events/nope/bookings",
        Some(booking_body(1)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn booking_reserves_and_cancel_restores_seats_once() {
    let app = app();
    send(&app, "POST", "/api/v1/events", Some(event_body("gophercon", &["go"]))).await;

    let (status, booking) = send(
        &app,
        "POST",
        "/api/v1/events/gophercon/bookings",
        Some(booking_body(4)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(booking["total_price"], 6000);
    assert_eq!(booking["status"], "pending");
    assert_eq!(booking["payment_status"], "pending");

    let (_, event) = send(&app, "GET", "/api/v1/events/gophercon", None).await;
    assert_eq!(event["available_seats"], 6);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/events/gophercon/bookings",
        Some(booking_body(7)),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], 4001);

    let id = booking["id"].as_str().unwrap().to_string();
    for _ in 0..2 {
        let (status, cancelled) =
            send(&app, "POST", &format!("/api/v1/bookings/{id}/cancel"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cancelled["status"], "cancelled");
    }

    let (_, event) = send(&app, "GET", "/api/v1/events/gophercon", None).await;
    assert_eq!(event["available_seats"], 10);

    let (status, _) = send(&app, "POST", &format!("/api/v1/bookings/{id}/confirm"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn confirm_and_payment_lifecycle() {
    let app = app();
    send(&app, "POST", "/api/v1/events", Some(event_body("kubecon", &[]))).await;
    let (_, booking) = send(
        &app,
        "POST",
        "/api/v1/events/kubecon/bookings",
        Some(booking_body(1)),
    )
    .await;
    let id = booking["id"].as_str().unwrap().to_string();

    let (status, confirmed) =
        send(&app, "POST", &format!("/api/v1/bookings/{id}/confirm"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(confirmed["status"], "confirmed");

    let payment_uri = format!("/api/v1/bookings/{id}/payment");
    let (status, paid) = send(
        &app,
        "PUT",
        &payment_uri,
        Some(json!({ "payment_status": "completed", "payment_id": "pi_123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid["payment_status"], "completed");
    assert_eq!(paid["payment_id"], "pi_123");

    let (status, _) = send(
        &app,
        "PUT",
        &payment_uri,
        Some(json!({ "payment_status": "failed" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, list) = send(&app, "GET", "/api/v1/events/kubecon/bookings", None).await;
    assert_eq!(list["bookings"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn similar_events_rank_by_shared_tags() {
    let app = app();
    for (slug, tags) in [
        ("source", vec!["go", "infra"]),
        ("one-shared", vec!["go"]),
        ("two-shared", vec!["infra", "go"]),
        ("unrelated", vec!["rust"]),
    ] {
        let (status, _) = send(&app, "POST", "/api/v1/events", Some(event_body(slug, &tags))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/api/v1/events/source/similar", None).await;
    assert_eq!(status, StatusCode::OK);
    let slugs: Vec<&str> = body["events"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["slug"].as_str())
        .collect();
    assert_eq!(slugs, ["two-shared", "one-shared"]);

    let (_, body) = send(&app, "GET", "/api/v1/events/source/similar?limit=1", None).await;
    assert_eq!(body["events"].as_array().map(Vec::len), Some(1));

    let (status, body) = send(&app, "GET", "/api/v1/events/missing/similar", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["events"], json!([]));
}

#[tokio::test]
async fn list_events_newest_first_with_paging() {
    let app = app();
    for slug in ["first", "second", "third"] {
        send(&app, "POST", "/api/v1/events", Some(event_body(slug, &[]))).await;
    }

    let (status, body) = send(&app, "GET", "/api/v1/events", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["events"][0]["slug"], "third");
    assert!(body.get("pagination").is_none());

    let (_, body) = send(&app, "GET", "/api/v1/events?page=2&per_page=2", None).await;
    assert_eq!(body["events"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["events"][0]["slug"], "first");
    assert_eq!(body["pagination"]["page"], 2);
}

async fn assert_validation(app: &Router, method: &str, uri: &str, body: Option<Value>) {
    let (status, body) = send(app, method, uri, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}: {body}");
    assert_eq!(body["error"]["code"], 1001, "{method} {uri}: {body}");
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn malformed_booking_body_is_validation_error() {
    let app = app();
    send(&app, "POST", "/api/v1/events", Some(event_body("devfest", &[]))).await;
    let uri = "/api/v1/events/devfest/bookings";

    assert_validation(
        &app,
        "POST",
        uri,
        Some(json!({ "user_name": "a", "user_email": "a@b.com" })),
    )
    .await;
    assert_validation(
        &app,
        "POST",
        uri,
        Some(json!({ "user_name": "a", "user_email": "a@b.com", "number_of_seats": "two" })),
    )
    .await;

    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (_, event) = send(&app, "GET", "/api/v1/events/devfest", None).await;
    assert_eq!(event["available_seats"], 10);
}

#[tokio::test]
async fn malformed_event_date_is_validation_error() {
    let app = app();
    let mut body = event_body("bad-date", &[]);
    body["date"] = json!("2026-13-45");
    assert_validation(&app, "POST", "/api/v1/events", Some(body)).await;

    let (status, _) = send(&app, "GET", "/api/v1/events/bad-date", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_query_and_path_are_validation_errors() {
    let app = app();
    send(&app, "POST", "/api/v1/events", Some(event_body("meetup", &["go"]))).await;

    assert_validation(&app, "GET", "/api/v1/events?page=first", None).await;
    assert_validation(&app, "GET", "/api/v1/events/meetup/similar?limit=-1", None).await;
    assert_validation(&app, "GET", "/api/v1/bookings/not-a-uuid", None).await;
    assert_validation(&app, "POST", "/api/v1/bookings/not-a-uuid/cancel", None).await;
}

#[tokio::test]
async fn booking_date_can_be_supplied() {
    let app = app();
    send(&app, "POST", "/api/v1/events", Some(event_body("summit", &[]))).await;
    let mut body = booking_body(1);
    body["booking_date"] = json!("2026-04-30T18:00:00Z");

    let (status, booking) =
        send(&app, "POST", "/api/v1/events/summit/bookings", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(booking["booking_date"], "2026-04-30T18:00:00Z");
}
