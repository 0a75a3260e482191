//! Client-side payment countdown.
//!
//! - [`format`] - `MM:SS` rendering and the low-time warning flag
//! - [`timer`] - [`Countdown`] state machine and the [`CountdownHandle`] task that drives it
//! - [`session`] - [`ReservationSession`], which ties a countdown to a Pending order

pub mod format;
pub mod session;
pub mod timer;

pub use format::{format_time, is_warning};
pub use session::ReservationSession;
pub use timer::{Countdown, CountdownHandle, CountdownState, Tick};
