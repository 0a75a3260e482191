//! # Order Actor
//!
//! Stores orders and enforces their lifecycle. Every status change goes through
//! `Order::on_update`, which applies the transition rules of
//! [`OrderStatus`](crate::model::OrderStatus) and the optional version check. Because
//! the actor handles one message at a time, two writers racing on the same order are
//! serialized: whichever arrives second is judged against the first one's result.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Dependencies
//!
//! `Context = (TicketClient, ShowtimeClient)`, injected at `run()`:
//!
//! ```rust,ignore
//! let (order_actor, order_client) = order_actor::new();
//! tokio::spawn(order_actor.run((ticket_client.clone(), showtime_client.clone())));
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::OrderClient;
use crate::framework::ResourceActor;
use crate::model::Order;

/// Creates a new Order actor and its client.
pub fn new() -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, OrderClient::new(generic_client))
}
