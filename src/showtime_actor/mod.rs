//! # Showtime Actor
//!
//! Stores scheduled screenings. Showtimes have no dependencies (`Context = ()`); other
//! actors and the cleanup sweep read them to decide whether a screening has started.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Showtime`]
//! - [`error`] - [`ShowtimeError`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ShowtimeClient;
use crate::framework::ResourceActor;
use crate::model::Showtime;

/// Creates a new Showtime actor and its client.
pub fn new() -> (ResourceActor<Showtime>, ShowtimeClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, ShowtimeClient::new(generic_client))
}
