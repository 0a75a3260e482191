//! Generic actor-backed store.
//!
//! Every persistent resource in the booking system (orders, tickets, showtimes) lives in
//! its own [`ResourceActor`], reached through a cloneable [`ResourceClient`].
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that stored types implement
//! - [`ResourceActor`] - Generic actor owning one store
//! - [`ResourceClient`] - Typed sender for store requests
//! - [`ActorClient`] - Default `get`/`delete`/`save` for domain clients
//! - [`FrameworkError`] - Transport errors
//!
//! # Testing
//!
//! See [`mock`] for a scripted client that injects store failures.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
