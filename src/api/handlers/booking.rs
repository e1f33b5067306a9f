//! Booking handlers: create, list, get, confirm, cancel, payment.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::api::dto::{BookingDto, BookingListResponse, CreateBookingRequest, UpdatePaymentRequest};
use crate::api::extract::{ApiJson, ApiPath};
use crate::app_state::AppState;
use crate::domain::BookingId;
use crate::error::{DevEventError, ErrorResponse};

/// `POST /events/{slug}/bookings` — Reserve seats.
///
/// # Errors
///
/// Returns [`DevEventError`] on missing event, invalid details or
/// insufficient seats.
#[utoipa::path(
    post,
    path = "/api/v1/events/{slug}/bookings",
    tag = "Bookings",
    summary = "Book seats",
    description = "Atomically reserves seats on the event and records a pending booking. The total price is fixed at booking time.",
    params(
        ("slug" = String, Path, description = "Event slug"),
    ),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingDto),
        (status = 400, description = "Invalid booking details", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 422, description = "Not enough seats left", body = ErrorResponse),
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
    ApiJson(req): ApiJson<CreateBookingRequest>,
) -> Result<impl IntoResponse, DevEventError> {
    let event = state.catalog.get_event_by_slug(&slug).await?;
    let booking = state.ledger.create_booking(event.id, req.into()).await?;
    Ok((StatusCode::CREATED, Json(BookingDto::from(booking))))
}

/// `GET /events/{slug}/bookings` — List an event's bookings.
///
/// # Errors
///
/// Returns [`DevEventError::EventNotFound`] if no event has this slug.
#[utoipa::path(
    get,
    path = "/api/v1/events/{slug}/bookings",
    tag = "Bookings",
    summary = "List bookings for an event",
    params(
        ("slug" = String, Path, description = "Event slug"),
    ),
    responses(
        (status = 200, description = "Bookings, newest first", body = BookingListResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
) -> Result<impl IntoResponse, DevEventError> {
    let event = state.catalog.get_event_by_slug(&slug).await?;
    let bookings = state.ledger.list_bookings(event.id).await?;
    Ok(Json(BookingListResponse {
        bookings: bookings.into_iter().map(BookingDto::from).collect(),
    }))
}

/// `GET /bookings/{id}` — Get one booking.
///
/// # Errors
///
/// Returns [`DevEventError::BookingNotFound`] if the booking does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    summary = "Get a booking",
    params(
        ("id" = uuid::Uuid, Path, description = "Booking UUID"),
    ),
    responses(
        (status = 200, description = "Booking details", body = BookingDto),
        (status = 400, description = "Malformed booking id", body = ErrorResponse),
        (status = 404, description = "Booking not found", body = ErrorResponse),
    )
)]
pub async fn get_booking(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<uuid::Uuid>,
) -> Result<impl IntoResponse, DevEventError> {
    let booking = state.ledger.get_booking(BookingId::from_uuid(id)).await?;
    Ok(Json(BookingDto::from(booking)))
}

/// `POST /bookings/{id}/confirm` — Confirm a pending booking.
///
/// # Errors
///
/// Returns [`DevEventError::InvalidState`] if the booking was cancelled.
#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/confirm",
    tag = "Bookings",
    summary = "Confirm a booking",
    description = "Moves a pending booking to confirmed. Confirming twice is a no-op.",
    params(
        ("id" = uuid::Uuid, Path, description = "Booking UUID"),
    ),
    responses(
        (status = 200, description = "Booking confirmed", body = BookingDto),
        (status = 404, description = "Booking not found", body = ErrorResponse),
        (status = 409, description = "Booking was cancelled", body = ErrorResponse),
    )
)]
pub async fn confirm_booking(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<uuid::Uuid>,
) -> Result<impl IntoResponse, DevEventError> {
    let booking = state.ledger.confirm_booking(BookingId::from_uuid(id)).await?;
    Ok(Json(BookingDto::from(booking)))
}

/// `POST /bookings/{id}/cancel` — Cancel a booking and release its seats.
///
/// # Errors
///
/// Returns [`DevEventError::BookingNotFound`] if the booking does not exist.
#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/cancel",
    tag = "Bookings",
    summary = "Cancel a booking",
    description = "Cancels the booking and returns its seats to the event. Cancelling twice releases the seats once.",
    params(
        ("id" = uuid::Uuid, Path, description = "Booking UUID"),
    ),
    responses(
        (status = 200, description = "Booking cancelled", body = BookingDto),
        (status = 404, description = "Booking not found", body = ErrorResponse),
    )
)]
pub async fn cancel_booking(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<uuid::Uuid>,
) -> Result<impl IntoResponse, DevEventError> {
    let booking = state.ledger.cancel_booking(BookingId::from_uuid(id)).await?;
    Ok(Json(BookingDto::from(booking)))
}

/// `PUT /bookings/{id}/payment` — Record a payment outcome.
///
/// # Errors
///
/// Returns [`DevEventError::InvalidState`] for an illegal payment transition.
#[utoipa::path(
    put,
    path = "/api/v1/bookings/{id}/payment",
    tag = "Bookings",
    summary = "Update payment status",
    description = "Moves the payment lifecycle: pending to completed or failed, completed to refunded.",
    params(
        ("id" = uuid::Uuid, Path, description = "Booking UUID"),
    ),
    request_body = UpdatePaymentRequest,
    responses(
        (status = 200, description = "Payment status updated", body = BookingDto),
        (status = 404, description = "Booking not found", body = ErrorResponse),
        (status = 409, description = "Illegal payment transition", body = ErrorResponse),
    )
)]
pub async fn update_payment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<uuid::Uuid>,
    ApiJson(req): ApiJson<UpdatePaymentRequest>,
) -> Result<impl IntoResponse, DevEventError> {
    let booking = state
        .ledger
        .update_payment_status(BookingId::from_uuid(id), req.payment_status, req.payment_id)
        .await?;
    Ok(Json(BookingDto::from(booking)))
}

/// Booking routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/events/{slug}/bookings",
            post(create_booking).get(list_bookings),
        )
        .route("/bookings/{id}", get(get_booking))
        .route("/bookings/{id}/confirm", post(confirm_booking))
        .route("/bookings/{id}/cancel", post(cancel_booking))
        .route("/bookings/{id}/payment", put(update_payment))
}
