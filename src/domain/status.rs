//! Booking and payment lifecycles.
//!
//! Both lifecycles are small state machines evaluated before any write.
//! The ledger persists a transition only when [`BookingStatus::transition`]
//! or [`PaymentStatus::transition`] reports [`Transition::Changed`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::DevEventError;

/// Outcome of evaluating a requested status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The record is already in the requested state; nothing to write.
    Unchanged,
    /// The change is legal and must be persisted.
    Changed,
}

/// Reservation lifecycle of a booking.
///
/// `pending → confirmed`, `pending → cancelled`, `confirmed → cancelled`.
/// Nothing leaves `cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Seats are held, awaiting confirmation.
    Pending,
    /// Reservation confirmed.
    Confirmed,
    /// Reservation cancelled; seats returned to the event.
    Cancelled,
}

impl BookingStatus {
    /// Evaluates a change from `self` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`DevEventError::InvalidState`] for any edge not in the
    /// state machine.
    pub fn transition(self, to: Self) -> Result<Transition, DevEventError> {
        use BookingStatus::{Cancelled, Confirmed, Pending};
        match (self, to) {
            (from, to) if from == to => Ok(Transition::Unchanged),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Cancelled) => {
                Ok(Transition::Changed)
            }
            (from, to) => Err(DevEventError::InvalidState(format!(
                "booking cannot move from {from} to {to}"
            ))),
        }
    }

    /// Returns `true` while the booking still holds seats.
    #[must_use]
    pub const fn holds_seats(self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Returns the storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = DevEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(DevEventError::Validation(format!(
                "unknown booking status: {other}"
            ))),
        }
    }
}

/// Payment lifecycle of a booking, independent of [`BookingStatus`].
///
/// `pending → completed`, `pending → failed`, `completed → refunded`.
/// `failed` and `refunded` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// No payment outcome recorded yet.
    Pending,
    /// Payment captured.
    Completed,
    /// Payment attempt failed.
    Failed,
    /// Captured payment returned to the attendee.
    Refunded,
}

impl PaymentStatus {
    /// Evaluates a change from `self` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`DevEventError::InvalidState`] for any edge not in the
    /// state machine, including every move out of a terminal state.
    pub fn transition(self, to: Self) -> Result<Transition, DevEventError> {
        use PaymentStatus::{Completed, Failed, Pending, Refunded};
        match (self, to) {
            (from, to) if from == to => Ok(Transition::Unchanged),
            (Pending, Completed) | (Pending, Failed) | (Completed, Refunded) => {
                Ok(Transition::Changed)
            }
            (from, to) => Err(DevEventError::InvalidState(format!(
                "payment cannot move from {from} to {to}"
            ))),
        }
    }

    /// Returns the storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = DevEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            other => Err(DevEventError::Validation(format!(
                "unknown payment status: {other}"
            ))),
        }
    }
}
