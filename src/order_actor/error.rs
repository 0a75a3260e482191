//! Error types for the Order actor.

use crate::framework::FrameworkError;
use crate::model::OrderStatus;
use crate::showtime_actor::ShowtimeError;
use crate::ticket_actor::TicketError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The order references a showtime that does not exist.
    #[error("Invalid showtime: {0}")]
    InvalidShowtime(String),

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// The requested status change is not allowed from the current status.
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// The order changed since the caller read it.
    #[error("Version conflict: expected {expected}, found {actual}")]
    VersionConflict { expected: u64, actual: u64 },

    /// A ticket operation failed while creating, finalizing or deleting the order.
    #[error(transparent)]
    Ticket(#[from] TicketError),

    /// Looking up the showtime failed.
    #[error(transparent)]
    Showtime(#[from] ShowtimeError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl OrderError {
    /// Rejections caused by the order having moved on (another writer got there first).
    /// Retrying the same write will never succeed.
    pub fn is_stale_write(&self) -> bool {
        matches!(
            self,
            OrderError::InvalidTransition { .. } | OrderError::VersionConflict { .. }
        )
    }
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e.into_entity_error::<OrderError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
