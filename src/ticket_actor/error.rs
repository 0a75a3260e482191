//! Error types for the Ticket actor.

use crate::framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during ticket operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TicketError {
    /// The requested ticket was not found.
    #[error("Ticket not found: {0}")]
    NotFound(String),

    /// The ticket data provided is invalid.
    #[error("Ticket validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for TicketError {
    fn from(e: FrameworkError) -> Self {
        match e.into_entity_error::<TicketError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => TicketError::NotFound(id),
            Err(other) => TicketError::ActorCommunicationError(other.to_string()),
        }
    }
}
