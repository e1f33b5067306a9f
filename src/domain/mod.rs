//! Domain layer: identifiers, events, bookings and their lifecycles.
//!
//! Everything here is pure data plus validation. Persistence lives in
//! [`crate::persistence`] and orchestration in [`crate::service`].

pub mod booking;
pub mod clock;
pub mod event;
pub mod ids;
pub mod slug;
pub mod status;
mod validate;

pub use booking::{Booking, NewBooking};
pub use clock::{Clock, SteppingClock, SystemClock};
pub use event::{Event, NewEvent};
pub use ids::{BookingId, EventId};
pub use slug::Slug;
pub use status::{BookingStatus, PaymentStatus, Transition};
