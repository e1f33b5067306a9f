//! Service layer: business logic orchestration.
//!
//! [`CatalogService`] owns events, [`BookingLedger`] owns bookings and seat
//! inventory, and [`SimilarityEngine`] derives related events. All three
//! share one store handle.

pub mod catalog;
pub mod ledger;
pub mod similarity;

pub use catalog::CatalogService;
pub use ledger::BookingLedger;
pub use similarity::SimilarityEngine;
