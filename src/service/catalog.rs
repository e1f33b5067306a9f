//! Event catalog: creation, lookup and listing.

use std::sync::Arc;

use crate::domain::{Clock, Event, EventId, NewEvent, Slug};
use crate::error::DevEventError;
use crate::persistence::{EventStore, ListQuery, StoreBackend};

/// Owns event records.
///
/// Creation is the only mutating operation; every other method is a
/// read-only view of the store.
#[derive(Debug)]
pub struct CatalogService<S = StoreBackend> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S: EventStore> CatalogService<S> {
    /// Creates a catalog over `store`.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Validates, normalizes and persists a new event.
    ///
    /// # Errors
    ///
    /// - [`DevEventError::Validation`] for missing or out-of-range fields.
    /// - [`DevEventError::DuplicateSlug`] if the normalized slug exists.
    /// - [`DevEventError::Store`] on persistence failure.
    pub async fn create_event(&self, input: NewEvent) -> Result<Event, DevEventError> {
        let event = input.into_event(EventId::new(), self.clock.now())?;
        self.store.insert_event(&event).await?;
        tracing::info!(
            event_id = %event.id,
            slug = %event.slug,
            capacity = ?event.capacity,
            "event created"
        );
        Ok(event)
    }

    /// Resolves an event by slug, normalizing it first.
    ///
    /// # Errors
    ///
    /// [`DevEventError::EventNotFound`] if no event matches (including a
    /// blank slug), [`DevEventError::Store`] on persistence failure.
    pub async fn get_event_by_slug(&self, raw_slug: &str) -> Result<Event, DevEventError> {
        let not_found = || DevEventError::EventNotFound(raw_slug.trim().to_lowercase());
        let slug = Slug::parse(raw_slug).map_err(|_| not_found())?;
        self.store.event_by_slug(&slug).await?.ok_or_else(not_found)
    }

    /// Lists events newest first.
    ///
    /// # Errors
    ///
    /// [`DevEventError::Store`] on persistence failure.
    pub async fn list_events(&self, query: ListQuery) -> Result<Vec<Event>, DevEventError> {
        self.store.list_events(query).await
    }
}
