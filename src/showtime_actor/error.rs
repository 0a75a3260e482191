//! Error types for the Showtime actor.

use crate::framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during showtime operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ShowtimeError {
    /// The requested showtime was not found.
    #[error("Showtime not found: {0}")]
    NotFound(String),

    /// The showtime data provided is invalid.
    #[error("Showtime validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for ShowtimeError {
    fn from(e: FrameworkError) -> Self {
        match e.into_entity_error::<ShowtimeError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => ShowtimeError::NotFound(id),
            Err(other) => ShowtimeError::ActorCommunicationError(other.to_string()),
        }
    }
}
