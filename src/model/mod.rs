//! Pure data structures (DTOs) implementing the [`ActorEntity`](crate::framework::ActorEntity) trait.

pub mod order;
pub mod showtime;
pub mod ticket;

pub use order::*;
pub use showtime::*;
pub use ticket::*;
