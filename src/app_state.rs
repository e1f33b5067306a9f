//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::Clock;
use crate::persistence::StoreBackend;
use crate::service::{BookingLedger, CatalogService, SimilarityEngine};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Event creation and lookup.
    pub catalog: Arc<CatalogService>,
    /// Seat reservations and booking status.
    pub ledger: Arc<BookingLedger>,
    /// Related-event recommendations.
    pub similarity: Arc<SimilarityEngine>,
}

impl AppState {
    /// Wires the three services over one shared store and clock.
    #[must_use]
    pub fn new(store: Arc<StoreBackend>, clock: Arc<dyn Clock>, similar_limit: usize) -> Self {
        Self {
            catalog: Arc::new(CatalogService::new(Arc::clone(&store), Arc::clone(&clock))),
            ledger: Arc::new(BookingLedger::new(Arc::clone(&store), clock)),
            similarity: Arc::new(SimilarityEngine::new(store, similar_limit)),
        }
    }
}
