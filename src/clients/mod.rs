//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod order_client;
pub mod showtime_client;
pub mod ticket_client;

pub use order_client::*;
pub use showtime_client::*;
pub use ticket_client::*;
