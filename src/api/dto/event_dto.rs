//! Event DTOs for create, get, list and similar-events operations.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common_dto::PaginationMeta;
use crate::domain::{Event, NewEvent};

/// Request body for `POST /events`.
///
/// `image` is the URL handed back by the object store after upload.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateEventRequest {
    /// Display title (max 100 chars).
    pub title: String,
    /// Desired slug; trimmed and lowercased.
    pub slug: String,
    /// Optional description (max 2000 chars).
    pub description: Option<String>,
    /// Venue.
    pub location: String,
    /// Optional organizer name.
    pub organizer: Option<String>,
    /// Image URL.
    pub image: String,
    /// Optional category.
    pub category: Option<String>,
    /// Calendar date (`YYYY-MM-DD`).
    pub date: Option<NaiveDate>,
    /// Free-text start time.
    pub time: String,
    /// Price per seat in minor units; defaults to 0.
    pub price: Option<i64>,
    /// Seat capacity (at least 1).
    pub capacity: Option<i32>,
    /// Initial seats available; defaults to `capacity`.
    pub available_seats: Option<i32>,
    /// Tags used for recommendations.
    pub tags: Vec<String>,
}

impl From<CreateEventRequest> for NewEvent {
    fn from(req: CreateEventRequest) -> Self {
        Self {
            title: req.title,
            slug: req.slug,
            description: req.description,
            location: req.location,
            organizer: req.organizer,
            image: req.image,
            category: req.category,
            date: req.date,
            time: req.time,
            price: req.price,
            capacity: req.capacity,
            available_seats: req.available_seats,
            tags: req.tags,
        }
    }
}

/// Public representation of an event.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventDto {
    /// Event identifier.
    pub id: uuid::Uuid,
    /// Normalized slug.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Venue.
    pub location: String,
    /// Organizer.
    pub organizer: Option<String>,
    /// Image URL.
    pub image: String,
    /// Category.
    pub category: Option<String>,
    /// Calendar date.
    pub date: NaiveDate,
    /// Free-text time.
    pub time: String,
    /// Price per seat in minor units.
    pub price: i64,
    /// Seat capacity.
    pub capacity: Option<i32>,
    /// Seats still available.
    pub available_seats: Option<i32>,
    /// Tags.
    pub tags: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<Event> for EventDto {
    fn from(event: Event) -> Self {
        Self {
            id: event.id.into(),
            slug: event.slug.to_string(),
            title: event.title,
            description: event.description,
            location: event.location,
            organizer: event.organizer,
            image: event.image,
            category: event.category,
            date: event.date,
            time: event.time,
            price: event.price,
            capacity: event.capacity,
            available_seats: event.available_seats,
            tags: event.tags,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

/// Response body for `GET /events`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventListResponse {
    /// Events, newest first.
    pub events: Vec<EventDto>,
    /// Page window, when the request was paged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

/// Query parameters for `GET /events/{slug}/similar`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SimilarParams {
    /// Maximum number of results (default 5, max 50).
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Response body for `GET /events/{slug}/similar`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SimilarEventsResponse {
    /// Related events, most shared tags first.
    pub events: Vec<EventDto>,
}
