#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Cinema Reservations
//!
//! > **Order lifecycle and payment expiry for a cinema booking backend.**
//!
//! Customers reserve seats by placing an order. The order stays `Pending` until it is
//! paid online (`Completed`) or at the box office (`Printed`), or until the customer
//! abandons it (`Canceled`). If nobody pays within the payment window, a background
//! sweep marks it `Failed`. A second sweep deletes dead orders and tickets that nobody
//! will ever use.
//!
//! ## 🏗️ Design
//!
//! ### One actor per store
//! Orders, tickets and showtimes each live in a generic
//! [`ResourceActor`](framework::ResourceActor). An actor handles one message at a time,
//! so concurrent writers on the same order are serialized without locks. A sweep
//! that tries to fail an order the customer just paid for sees the paid order and is
//! rejected by the transition rules of [`OrderStatus`](model::OrderStatus).
//!
//! ### Closed status enum
//! `OrderStatus` is an enum with an exhaustive transition table: `Pending` is the only
//! state that can move, and every other state is final. Status changes can also carry
//! the version the caller last read, so a stale write fails instead of overwriting.
//!
//! ### Injected time and configuration
//! Sweepers read "now" from a [`Clock`](clock::Clock) and the payment timeout from a
//! [`PaymentTimeoutSource`](config::PaymentTimeoutSource) at the start of every run,
//! so both can be driven by hand in tests.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! Generic store actor, its client, the [`ActorEntity`](framework::ActorEntity) trait
//! and the [`MockClient`](framework::mock::MockClient) used to inject store failures.
//!
//! ### 2. The Stores ([`order_actor`], [`ticket_actor`], [`showtime_actor`])
//! `ActorEntity` implementations. The order actor creates, finalizes and deletes the
//! tickets it owns.
//!
//! ### 3. The Interface ([`clients`])
//! Typed wrappers ([`OrderClient`](clients::OrderClient) and friends) over the generic client.
//!
//! ### 4. Expiry ([`expiry`], [`sweeper`])
//! [`ExpiryPolicy`](expiry::ExpiryPolicy) decides when a Pending order is overdue;
//! [`OrderSweeper`](sweeper::OrderSweeper) and [`CleanupSweeper`](sweeper::CleanupSweeper)
//! act on it.
//!
//! ### 5. The Client Side ([`countdown`])
//! The advisory payment countdown and the [`ReservationSession`](countdown::ReservationSession)
//! that cancels the order when it runs out.
//!
//! ### 6. The Orchestrator ([`lifecycle`])
//! [`BookingSystem`](lifecycle::BookingSystem) spawns and wires the actors, schedules the
//! sweeps with bounded retry, and shuts everything down.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! PAYMENT_TIMEOUT_MINUTES=15 RUST_LOG=info cargo run
//! ```

pub mod clients;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod expiry;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod showtime_actor;
pub mod sweeper;
pub mod ticket_actor;
