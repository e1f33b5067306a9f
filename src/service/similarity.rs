//! "You might also like": related events by shared tags.

use std::sync::Arc;

use crate::domain::{Event, Slug};
use crate::persistence::{EventStore, StoreBackend};

/// Default number of related events returned.
pub const DEFAULT_SIMILAR_LIMIT: usize = 5;

/// Derives related events from tag overlap.
///
/// Fail-soft: an unknown slug, a tagless event or a store failure all yield
/// an empty list. Results are ranked by the number of shared tags, then
/// newest first.
#[derive(Debug)]
pub struct SimilarityEngine<S = StoreBackend> {
    store: Arc<S>,
    default_limit: usize,
}

impl<S: EventStore> SimilarityEngine<S> {
    /// Creates an engine over `store` returning `default_limit` results
    /// when the caller does not ask for a specific count.
    #[must_use]
    pub fn new(store: Arc<S>, default_limit: usize) -> Self {
        Self {
            store,
            default_limit,
        }
    }

    /// Result count used when the caller passes no limit.
    #[must_use]
    pub const fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// Returns up to `limit` events sharing at least one tag with the event
    /// at `raw_slug`, never including that event itself.
    pub async fn similar_events(&self, raw_slug: &str, limit: usize) -> Vec<Event> {
        let Ok(slug) = Slug::parse(raw_slug) else {
            return Vec::new();
        };
        let source = match self.store.event_by_slug(&slug).await {
            Ok(Some(event)) => event,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(%slug, error = %err, "similar events: source lookup failed");
                return Vec::new();
            }
        };
        if source.tags.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut candidates = match self.store.events_sharing_tags(source.id, &source.tags).await {
            Ok(events) => events,
            Err(err) => {
                tracing::warn!(%slug, error = %err, "similar events: tag query failed");
                return Vec::new();
            }
        };

        // Stable sort keeps the store's newest-first order among equal overlaps.
        candidates.retain(|event| event.id != source.id);
        candidates.sort_by_key(|event| std::cmp::Reverse(event.shared_tag_count(&source.tags)));
        candidates.truncate(limit);
        candidates
    }
}
