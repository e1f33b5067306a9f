//! Event handlers: create, list, get, similar.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    CreateEventRequest, EventDto, EventListResponse, PaginationParams, SimilarEventsResponse,
    SimilarParams,
};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::app_state::AppState;
use crate::error::{DevEventError, ErrorResponse};

/// Upper bound on `limit` for the similar-events endpoint.
const MAX_SIMILAR_LIMIT: usize = 50;

/// `POST /events` — Publish a new event.
///
/// # Errors
///
/// Returns [`DevEventError`] on invalid input or a taken slug.
#[utoipa::path(
    post,
    path = "/api/v1/events",
    tag = "Events",
    summary = "Create an event",
    description = "Validates and stores a new event. The slug is trimmed and lowercased; `available_seats` defaults to `capacity`.",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = EventDto),
        (status = 400, description = "Invalid event data", body = ErrorResponse),
        (status = 409, description = "Slug already exists", body = ErrorResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateEventRequest>,
) -> Result<impl IntoResponse, DevEventError> {
    let event = state.catalog.create_event(req.into()).await?;
    Ok((StatusCode::CREATED, Json(EventDto::from(event))))
}

/// `GET /events` — List events, newest first.
///
/// # Errors
///
/// Returns [`DevEventError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "Events",
    summary = "List events",
    description = "Returns events ordered by creation time, newest first. Without paging parameters the full list is returned.",
    params(PaginationParams),
    responses(
        (status = 200, description = "Event list", body = EventListResponse),
        (status = 400, description = "Malformed paging parameters", body = ErrorResponse),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<impl IntoResponse, DevEventError> {
    let events = state.catalog.list_events(params.to_list_query()).await?;
    Ok(Json(EventListResponse {
        events: events.into_iter().map(EventDto::from).collect(),
        pagination: params.clamped(),
    }))
}

/// `GET /events/{slug}` — Get one event.
///
/// # Errors
///
/// Returns [`DevEventError::EventNotFound`] if no event has this slug.
#[utoipa::path(
    get,
    path = "/api/v1/events/{slug}",
    tag = "Events",
    summary = "Get an event",
    description = "Looks an event up by slug. Case and surrounding whitespace are ignored.",
    params(
        ("slug" = String, Path, description = "Event slug"),
    ),
    responses(
        (status = 200, description = "Event details", body = EventDto),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
) -> Result<impl IntoResponse, DevEventError> {
    let event = state.catalog.get_event_by_slug(&slug).await?;
    Ok(Json(EventDto::from(event)))
}

/// `GET /events/{slug}/similar` — Related events by shared tags.
///
/// An unknown or tagless event yields an empty list rather than an error.
#[utoipa::path(
    get,
    path = "/api/v1/events/{slug}/similar",
    tag = "Events",
    summary = "Similar events",
    description = "Returns other events sharing at least one tag, most shared tags first.",
    params(
        ("slug" = String, Path, description = "Event slug"),
        SimilarParams,
    ),
    responses(
        (status = 200, description = "Related events", body = SimilarEventsResponse),
        (status = 400, description = "Malformed limit", body = ErrorResponse),
    )
)]
pub async fn similar_events(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
    ApiQuery(params): ApiQuery<SimilarParams>,
) -> impl IntoResponse {
    let limit = params
        .limit
        .unwrap_or_else(|| state.similarity.default_limit())
        .min(MAX_SIMILAR_LIMIT);
    let events = state.similarity.similar_events(&slug, limit).await;
    Json(SimilarEventsResponse {
        events: events.into_iter().map(EventDto::from).collect(),
    })
}

/// Event routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_event).get(list_events))
        .route("/events/{slug}", get(get_event))
        .route("/events/{slug}/similar", get(similar_events))
}
