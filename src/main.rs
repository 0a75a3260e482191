//! # Cinema Reservations demo
//!
//! Walks one booking day through the system:
//! 1. Starts the [`BookingSystem`] and its sweeps.
//! 2. Places two orders, pays for one.
//! 3. Lets the other expire and runs the sweeps by hand to show the result.

use chrono::{Duration, Utc};
use cinema_reservations::clock::{Clock, ManualClock};
use cinema_reservations::config::{BookingConfig, PaymentTimeoutSource, SharedPaymentTimeout};
use cinema_reservations::countdown::{format_time, is_warning, ReservationSession};
use cinema_reservations::framework::ActorClient;
use cinema_reservations::lifecycle::tracing::setup_tracing;
use cinema_reservations::lifecycle::BookingSystem;
use cinema_reservations::model::{OrderCreate, ShowtimeCreate};
use std::sync::Arc;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let t0 = Utc::now();
    let clock = ManualClock::new(t0);
    let timeout = SharedPaymentTimeout::default();
    timeout.set(std::env::var("PAYMENT_TIMEOUT_MINUTES").unwrap_or_else(|_| "15".into()));
    let policy = timeout.payment_timeout().map_err(|e| e.to_string())?;

    let mut system = BookingSystem::with_clock(Arc::new(clock.clone()));
    system.start_sweepers(&BookingConfig::from_env(), Arc::new(timeout.clone()));

    let showtime_id = system
        .showtimes
        .create_showtime(ShowtimeCreate {
            movie: "Metropolis".into(),
            hall: "Hall 1".into(),
            start_at: t0 + Duration::hours(2),
        })
        .await
        .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("booking");
    let (paid_id, abandoned_id) = async {
        let paid = system
            .orders
            .place_order(OrderCreate {
                customer: "ada@example.com".into(),
                showtime_id,
                seats: vec!["F7".into(), "F8".into()],
                created_at: Some(clock.now()),
            })
            .await?;
        let abandoned = system
            .orders
            .place_order(OrderCreate {
                customer: "bob@example.com".into(),
                showtime_id,
                seats: vec!["G1".into()],
                created_at: Some(clock.now()),
            })
            .await?;
        system.orders.complete(paid).await?;
        Ok::<_, cinema_reservations::order_actor::OrderError>((paid, abandoned))
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let abandoned = system
        .orders
        .get(abandoned_id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or("order vanished")?;
    let session = ReservationSession::begin(
        &abandoned,
        &policy,
        clock.now(),
        system.orders.clone(),
        |left| {
            if is_warning(left) {
                warn!(remaining = %format_time(left), "Hurry up");
            }
        },
    )
    .map_err(|e| e.to_string())?;
    info!(
        order_id = %session.order_id(),
        remaining = %format_time(session.remaining().unwrap_or(0)),
        "Waiting for payment"
    );
    session.end();

    // The customer walks away; jump past the payment window.
    clock.advance(policy.timeout() + Duration::minutes(1));
    let report = system
        .order_sweeper(Arc::new(timeout.clone()))
        .sweep_expired()
        .await
        .map_err(|e| e.to_string())?;
    info!(%report, "Order sweep");

    let report = system
        .cleanup_sweeper()
        .sweep()
        .await
        .map_err(|e| e.to_string())?;
    info!(%report, "Cleanup sweep");

    let remaining = system.orders.list_all().await.map_err(|e| e.to_string())?;
    for order in &remaining {
        info!(order_id = %order.id, status = %order.status, tickets = order.tickets.len(), "Kept");
    }
    info!(%paid_id, %abandoned_id, kept = remaining.len(), "Demo finished");

    system.shutdown().await
}
