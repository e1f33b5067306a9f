//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All resource endpoints are mounted under `/api/v1`; `/health` sits at the
//! root. With the `swagger-ui` feature the OpenAPI document is served at
//! `/api-docs/openapi.json` and browsable at `/swagger-ui`.

pub mod dto;
pub mod extract;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::domain::{BookingStatus, PaymentStatus};
use crate::error::{ErrorBody, ErrorResponse};

/// OpenAPI document covering every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "DevEvent API", description = "Event catalog, seat bookings and related events."),
    paths(
        handlers::event::create_event,
        handlers::event::list_events,
        handlers::event::get_event,
        handlers::event::similar_events,
        handlers::booking::create_booking,
        handlers::booking::list_bookings,
        handlers::booking::get_booking,
        handlers::booking::confirm_booking,
        handlers::booking::cancel_booking,
        handlers::booking::update_payment,
        handlers::system::health_handler,
    ),
    components(schemas(
        dto::CreateEventRequest,
        dto::EventDto,
        dto::EventListResponse,
        dto::SimilarEventsResponse,
        dto::PaginationMeta,
        dto::CreateBookingRequest,
        dto::UpdatePaymentRequest,
        dto::BookingDto,
        dto::BookingListResponse,
        handlers::system::HealthResponse,
        BookingStatus,
        PaymentStatus,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "Events", description = "Event catalog"),
        (name = "Bookings", description = "Seat reservations and payment status"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}
