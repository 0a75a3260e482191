//! # Ticket Actor
//!
//! Stores seat tickets. Tickets are created by the Order actor when an order is placed,
//! receive a code through [`TicketAction::IssueCode`] when the order is paid, and are
//! removed either with their order or by the stale ticket sweep.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Ticket`]
//! - [`error`] - [`TicketError`]
//! - [`actions`] - [`TicketAction`]
//! - [`new()`] - Factory function that creates the actor and client

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::TicketClient;
use crate::framework::ResourceActor;
use crate::model::Ticket;

/// Creates a new Ticket actor and its client.
pub fn new() -> (ResourceActor<Ticket>, TicketClient) {
    let (actor, generic_client) = ResourceActor::new(64);
    (actor, TicketClient::new(generic_client))
}
