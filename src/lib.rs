//! # devevent
//!
//! REST service for a developer-event catalog: organizers publish events,
//! attendees reserve seats, and each event page can suggest related events
//! by shared tags.
//!
//! Seat accounting is the one piece of shared mutable state. Every
//! reservation and every release is a single atomic step in the store, so
//! concurrent bookings can never oversell an event.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── CatalogService, BookingLedger, SimilarityEngine (service/)
//!     │
//!     ├── Event, Booking, status machines (domain/)
//!     │
//!     └── EventStore (persistence/)
//!             ├── MemoryStore
//!             └── PostgresStore
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
