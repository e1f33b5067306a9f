//! Published events and their seat inventory.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::validate::{max_chars, optional, required};
use super::{EventId, Slug};
use crate::error::DevEventError;

/// Maximum length of an event title.
pub const TITLE_MAX_CHARS: usize = 100;

/// Maximum length of an event description.
pub const DESCRIPTION_MAX_CHARS: usize = 2000;

/// A published happening with schedule, location and finite seat inventory.
///
/// `available_seats` is `None` when the organizer does not track seats; such
/// events accept any number of bookings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier (immutable after creation).
    pub id: EventId,
    /// Normalized external identifier (immutable after creation).
    pub slug: Slug,
    /// Display title.
    pub title: String,
    /// Long-form description.
    pub description: Option<String>,
    /// Venue or address.
    pub location: String,
    /// Hosting person or organization.
    pub organizer: Option<String>,
    /// Object-store URL of the cover image.
    pub image: String,
    /// Free-form category label.
    pub category: Option<String>,
    /// Calendar date of the event.
    pub date: NaiveDate,
    /// Free-text start time (e.g. `"18:30 CET"`).
    pub time: String,
    /// Price per seat in the smallest currency unit.
    pub price: i64,
    /// Total seat capacity, when tracked.
    pub capacity: Option<i32>,
    /// Seats still bookable, when tracked.
    pub available_seats: Option<i32>,
    /// Normalized tag set used by the similarity engine.
    pub tags: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Returns `true` when bookings are limited by `available_seats`.
    #[must_use]
    pub const fn tracks_seats(&self) -> bool {
        self.available_seats.is_some()
    }

    /// Returns `true` if a booking for `seats` fits the current inventory.
    #[must_use]
    pub fn has_seats_for(&self, seats: i32) -> bool {
        if !self.tracks_seats() {
            return true;
        }
        self.available_seats.is_some_and(|available| seats <= available)
    }

    /// Number of tags this event shares with `tags`.
    #[must_use]
    pub fn shared_tag_count(&self, tags: &[String]) -> usize {
        self.tags.iter().filter(|tag| tags.contains(tag)).count()
    }

    /// Takes `seats` off the inventory if enough remain.
    ///
    /// Returns `false` and leaves the event untouched otherwise. Events that
    /// do not track seats always succeed.
    pub fn try_reserve(&mut self, seats: i32, now: DateTime<Utc>) -> bool {
        match self.available_seats {
            None => true,
            Some(available) if seats <= available => {
                self.available_seats = Some(available - seats);
                self.updated_at = now;
                true
            }
            Some(_) => false,
        }
    }

    /// Returns `seats` to the inventory, never exceeding `capacity`.
    pub fn release(&mut self, seats: i32, now: DateTime<Utc>) {
        if let Some(available) = self.available_seats {
            let restored = available.saturating_add(seats);
            self.available_seats = Some(match self.capacity {
                Some(capacity) => restored.min(capacity),
                None => restored,
            });
            self.updated_at = now;
        }
    }
}

/// Input for creating an event.
///
/// Strings are raw user input; [`NewEvent::into_event`] trims, validates
/// and normalizes them.
#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    /// Display title (required).
    pub title: String,
    /// Requested slug (required, normalized).
    pub slug: String,
    /// Optional description.
    pub description: Option<String>,
    /// Venue (required).
    pub location: String,
    /// Optional organizer name.
    pub organizer: Option<String>,
    /// Image URL returned by the object store (required).
    pub image: String,
    /// Optional category.
    pub category: Option<String>,
    /// Calendar date (required).
    pub date: Option<NaiveDate>,
    /// Free-text time (required).
    pub time: String,
    /// Price per seat; defaults to 0.
    pub price: Option<i64>,
    /// Seat capacity; must be at least 1 when given.
    pub capacity: Option<i32>,
    /// Initial available seats; defaults to `capacity`.
    pub available_seats: Option<i32>,
    /// Raw tags.
    pub tags: Vec<String>,
}

impl NewEvent {
    /// Validates the input and builds the [`Event`] to persist.
    ///
    /// # Errors
    ///
    /// Returns [`DevEventError::Validation`] when a required field is
    /// missing or a numeric field is out of range.
    pub fn into_event(self, id: EventId, now: DateTime<Utc>) -> Result<Event, DevEventError> {
        let title = required("title", &self.title)?;
        max_chars("title", &title, TITLE_MAX_CHARS)?;
        let slug = Slug::parse(&self.slug)?;
        let location = required("location", &self.location)?;
        let image = required("image", &self.image)?;
        let time = required("time", &self.time)?;
        let date = self
            .date
            .ok_or_else(|| DevEventError::Validation("date is required".to_string()))?;

        let description = optional(self.description.as_deref());
        if let Some(description) = &description {
            max_chars("description", description, DESCRIPTION_MAX_CHARS)?;
        }

        let price = self.price.unwrap_or(0);
        if price < 0 {
            return Err(DevEventError::Validation(
                "price cannot be negative".to_string(),
            ));
        }

        if let Some(capacity) = self.capacity
            && capacity < 1
        {
            return Err(DevEventError::Validation(
                "capacity must be at least 1".to_string(),
            ));
        }

        let available_seats = self.available_seats.or(self.capacity);
        if let Some(available) = available_seats {
            if available < 0 {
                return Err(DevEventError::Validation(
                    "available seats cannot be negative".to_string(),
                ));
            }
            if let Some(capacity) = self.capacity
                && available > capacity
            {
                return Err(DevEventError::Validation(format!(
                    "available seats ({available}) cannot exceed capacity ({capacity})"
                )));
            }
        }

        Ok(Event {
            id,
            slug,
            title,
            description,
            location,
            organizer: optional(self.organizer.as_deref()),
            image,
            category: optional(self.category.as_deref()),
            date,
            time,
            price,
            capacity: self.capacity,
            available_seats,
            tags: normalize_tags(&self.tags),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Trims and lowercases tags, dropping blanks and duplicates while keeping
/// first-seen order.
#[must_use]
pub fn normalize_tags(raw: &[String]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(raw.len());
    for tag in raw {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn new_event(slug: &str) -> NewEvent {
        NewEvent {
            title: "RustConf".to_string(),
            slug: slug.to_string(),
            location: "Montreal".to_string(),
            image: "https://img.example.com/rustconf.png".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 9, 8),
            time: "09:00".to_string(),
            ..NewEvent::default()
        }
    }

    fn build(input: NewEvent) -> Result<Event, DevEventError> {
        input.into_event(EventId::new(), Utc::now())
    }

    #[test]
    fn defaults_price_and_seats() {
        let Ok(event) = build(NewEvent {
            capacity: Some(10),
            ..new_event(" RustConf-2026 ")
        }) else {
            panic!("valid event");
        };
        assert_eq!(event.slug.as_str(), "rustconf-2026");
        assert_eq!(event.price, 0);
        assert_eq!(event.available_seats, Some(10));
    }

    #[test]
    fn missing_required_fields_fail() {
        assert!(build(NewEvent { title: " ".into(), ..new_event("a") }).is_err());
        assert!(build(NewEvent { location: String::new(), ..new_event("a") }).is_err());
        assert!(build(NewEvent { image: String::new(), ..new_event("a") }).is_err());
        assert!(build(NewEvent { time: String::new(), ..new_event("a") }).is_err());
        assert!(build(NewEvent { date: None, ..new_event("a") }).is_err());
        assert!(build(new_event("  ")).is_err());
    }

    #[test]
    fn numeric_ranges_are_enforced() {
        assert!(build(NewEvent { price: Some(-1), ..new_event("a") }).is_err());
        assert!(build(NewEvent { capacity: Some(0), ..new_event("a") }).is_err());
        assert!(build(NewEvent { available_seats: Some(-1), ..new_event("a") }).is_err());
        assert!(
            build(NewEvent {
                capacity: Some(5),
                available_seats: Some(6),
                ..new_event("a")
            })
            .is_err()
        );
    }

    #[test]
    fn description_is_capped() {
        let long = "x".repeat(DESCRIPTION_MAX_CHARS + 1);
        assert!(build(NewEvent { description: Some(long), ..new_event("a") }).is_err());
    }

    #[test]
    fn tags_are_normalized() {
        let tags = normalize_tags(&[" Go ".into(), "infra".into(), "go".into(), "".into()]);
        assert_eq!(tags, vec!["go".to_string(), "infra".to_string()]);
    }

    #[test]
    fn reserve_and_release_respect_capacity() {
        let Ok(mut event) = build(NewEvent { capacity: Some(10), ..new_event("a") }) else {
            panic!("valid event");
        };
        let now = Utc::now();
        assert!(event.try_reserve(6, now));
        assert_eq!(event.available_seats, Some(4));
        assert!(!event.try_reserve(5, now));
        assert_eq!(event.available_seats, Some(4));
        event.release(6, now);
        assert_eq!(event.available_seats, Some(10));
        event.release(3, now);
        assert_eq!(event.available_seats, Some(10));
    }

    #[test]
    fn untracked_events_always_have_room() {
        let Ok(mut event) = build(new_event("open-air")) else {
            panic!("valid event");
        };
        assert!(!event.tracks_seats());
        assert!(event.has_seats_for(1_000));
        assert!(event.try_reserve(1_000, Utc::now()));
        assert_eq!(event.available_seats, None);
    }
}
