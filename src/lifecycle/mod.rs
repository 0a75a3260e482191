//! Startup, background scheduling and shutdown.

pub mod booking_system;
pub mod retry;
pub mod scheduler;
pub mod tracing;

pub use booking_system::BookingSystem;
pub use retry::RetryPolicy;
pub use scheduler::spawn_periodic;
