use chrono::{DateTime, Duration, Utc};
use cinema_reservations::clock::{Clock, ManualClock};
use cinema_reservations::config::{BookingConfig, SharedPaymentTimeout};
use cinema_reservations::countdown::ReservationSession;
use cinema_reservations::expiry::ExpiryPolicy;
use cinema_reservations::framework::ActorClient;
use cinema_reservations::lifecycle::BookingSystem;
use cinema_reservations::model::{OrderCreate, OrderId, OrderStatus, ShowtimeCreate, ShowtimeId};
use std::sync::Arc;

async fn showtime(system: &BookingSystem, start_at: DateTime<Utc>) -> ShowtimeId {
    system
        .showtimes
        .create_showtime(ShowtimeCreate {
            movie: "Metropolis".into(),
            hall: "Hall 1".into(),
            start_at,
        })
        .await
        .expect("Failed to create showtime")
}

async fn order(
    system: &BookingSystem,
    showtime_id: ShowtimeId,
    seats: &[&str],
    created_at: DateTime<Utc>,
) -> OrderId {
    system
        .orders
        .place_order(OrderCreate {
            customer: "ada@example.com".into(),
            showtime_id,
            seats: seats.iter().map(|s| s.to_string()).collect(),
            created_at: Some(created_at),
        })
        .await
        .expect("Failed to place order")
}

async fn status(system: &BookingSystem, id: OrderId) -> Option<OrderStatus> {
    system
        .orders
        .get(id)
        .await
        .expect("Failed to get order")
        .map(|o| o.status)
}

/// Full day with all real actors: orders are placed, paid, abandoned, expired and
/// cleaned up.
#[tokio::test]
async fn test_full_booking_lifecycle() {
    let t0 = Utc::now();
    let clock = ManualClock::new(t0);
    let system = BookingSystem::with_clock(Arc::new(clock.clone()));
    let timeout = Arc::new(SharedPaymentTimeout::minutes(15));

    let screening = showtime(&system, t0 + Duration::hours(2)).await;
    let completed = order(&system, screening, &["A1", "A2"], t0).await;
    let printed = order(&system, screening, &["B1"], t0).await;
    let abandoned = order(&system, screening, &["C1", "C2"], t0).await;
    let canceled = order(&system, screening, &["D1"], t0).await;

    system.orders.complete(completed).await.unwrap();
    system.orders.print(printed).await.unwrap();
    system.orders.cancel(canceled).await.unwrap();

    let tickets = system.tickets.list_for_order(completed).await.unwrap();
    assert_eq!(tickets.len(), 2);
    assert!(tickets.iter().all(|t| t.is_issued()));
    assert_ne!(tickets[0].code, tickets[1].code);
    let unissued = system.tickets.list_unissued(screening).await.unwrap();
    assert_eq!(unissued.len(), 3);

    // 10 minutes in: nothing has expired yet
    clock.advance(Duration::minutes(10));
    let sweeper = system.order_sweeper(timeout.clone());
    assert_eq!(sweeper.sweep_expired().await.unwrap().transitioned, 0);
    assert_eq!(status(&system, abandoned).await, Some(OrderStatus::Pending));

    // 16 minutes in: the abandoned order fails
    clock.advance(Duration::minutes(6));
    let report = sweeper.sweep_expired().await.unwrap();
    assert_eq!(report.examined, 1);
    assert_eq!(report.transitioned, 1);
    assert_eq!(status(&system, abandoned).await, Some(OrderStatus::Failed));

    let report = system.cleanup_sweeper().sweep_terminal_orders().await.unwrap();
    assert_eq!(report.transitioned, 2);
    assert_eq!(status(&system, abandoned).await, None);
    assert_eq!(status(&system, canceled).await, None);
    assert_eq!(status(&system, completed).await, Some(OrderStatus::Completed));
    assert_eq!(status(&system, printed).await, Some(OrderStatus::Printed));
    assert_eq!(
        system.tickets.list_for_showtime(screening).await.unwrap().len(),
        3
    );

    system.shutdown().await.unwrap();
}

/// Pending orders whose showtime has started lose their tickets first and are failed
/// and deleted later; the cascade tolerates the missing tickets.
#[tokio::test]
async fn test_stale_tickets_then_expired_order() {
    let t0 = Utc::now();
    let clock = ManualClock::new(t0);
    let system = BookingSystem::with_clock(Arc::new(clock.clone()));

    let screening = showtime(&system, t0 + Duration::minutes(5)).await;
    let paid = order(&system, screening, &["A1"], t0).await;
    let unpaid = order(&system, screening, &["A2", "A3"], t0).await;
    system.orders.complete(paid).await.unwrap();

    clock.advance(Duration::minutes(6));
    let cleanup = system.cleanup_sweeper();
    let report = cleanup.sweep_stale_tickets().await.unwrap();
    assert_eq!(report.transitioned, 2);
    assert!(system.tickets.list_unissued(screening).await.unwrap().is_empty());
    assert_eq!(system.tickets.list_for_order(paid).await.unwrap().len(), 1);

    clock.advance(Duration::minutes(10));
    let report = system
        .order_sweeper(Arc::new(SharedPaymentTimeout::minutes(15)))
        .sweep_expired()
        .await
        .unwrap();
    assert_eq!(report.transitioned, 1);

    let report = cleanup.sweep().await.unwrap();
    assert_eq!(report.transitioned, 1);
    assert_eq!(report.failed, 0);
    assert_eq!(status(&system, unpaid).await, None);

    system.shutdown().await.unwrap();
}

/// Payments and the expiry sweep race on the same orders. Every order ends up in
/// exactly one terminal state, and only paid orders have codes.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_payment_racing_the_sweep() {
    let t0 = Utc::now();
    let clock = ManualClock::new(t0);
    let system = BookingSystem::with_clock(Arc::new(clock.clone()));
    let screening = showtime(&system, t0 + Duration::hours(2)).await;

    let mut ids = Vec::new();
    for i in 0..20 {
        ids.push(order(&system, screening, &[&format!("R{i}")], t0).await);
    }
    clock.advance(Duration::minutes(16));

    let sweeper = system.order_sweeper(Arc::new(SharedPaymentTimeout::minutes(15)));
    let sweep = tokio::spawn(async move { sweeper.sweep_expired().await });
    let payments: Vec<_> = ids
        .iter()
        .map(|id| {
            let orders = system.orders.clone();
            let id = *id;
            tokio::spawn(async move { orders.complete(id).await.is_ok() })
        })
        .collect();

    let report = sweep.await.unwrap().unwrap();
    let mut paid = 0;
    for payment in payments {
        if payment.await.unwrap() {
            paid += 1;
        }
    }
    // a payment that lands before the listing is never examined by the sweep
    assert_eq!(report.transitioned + paid, 20);
    assert!(report.skipped <= paid);
    assert_eq!(report.failed, 0);

    for id in &ids {
        let order = system.orders.get(*id).await.unwrap().unwrap();
        let tickets = system.tickets.list_for_order(*id).await.unwrap();
        match order.status {
            OrderStatus::Completed => assert!(tickets.iter().all(|t| t.is_issued())),
            OrderStatus::Failed => assert!(tickets.iter().all(|t| !t.is_issued())),
            other => panic!("{id} ended as {other}"),
        }
        assert_eq!(order.version, 1);
    }

    system.shutdown().await.unwrap();
}

/// Background jobs sweep on their own schedule and recover from a bad configuration
/// once it is fixed.
#[tokio::test(start_paused = true)]
async fn test_background_sweepers() {
    let t0 = Utc::now();
    let clock = ManualClock::new(t0);
    let mut system = BookingSystem::with_clock(Arc::new(clock.clone()));
    let timeout = SharedPaymentTimeout::default();
    let config = BookingConfig {
        order_sweep_interval: std::time::Duration::from_secs(60),
        cleanup_sweep_interval: std::time::Duration::from_secs(300),
        sweep_max_attempts: 3,
    };
    system.start_sweepers(&config, Arc::new(timeout.clone()));

    let screening = showtime(&system, t0 + Duration::hours(2)).await;
    let id = order(&system, screening, &["A1"], t0).await;
    clock.advance(Duration::minutes(16));

    // timeout not configured: the run and its retries fail, nothing changes
    tokio::time::sleep(std::time::Duration::from_secs(61)).await;
    assert_eq!(status(&system, id).await, Some(OrderStatus::Pending));

    timeout.set("15");
    tokio::time::sleep(std::time::Duration::from_secs(60)).await;
    assert_eq!(status(&system, id).await, Some(OrderStatus::Failed));

    tokio::time::sleep(std::time::Duration::from_secs(300)).await;
    assert_eq!(status(&system, id).await, None);

    system.shutdown().await.unwrap();
}

/// The client countdown cancels the order when it runs out, unless the order has
/// already moved on.
#[tokio::test(start_paused = true)]
async fn test_reservation_session_times_out() {
    let t0 = Utc::now();
    let clock = ManualClock::new(t0);
    let system = BookingSystem::with_clock(Arc::new(clock.clone()));
    let policy = ExpiryPolicy::new(Duration::seconds(30));
    let screening = showtime(&system, t0 + Duration::hours(2)).await;

    let abandoned = order(&system, screening, &["A1"], t0).await;
    let paid = order(&system, screening, &["A2"], t0).await;

    let snapshot = |id| {
        let orders = system.orders.clone();
        async move { orders.get(id).await.unwrap().unwrap() }
    };
    let mut abandoned_session = ReservationSession::begin(
        &snapshot(abandoned).await,
        &policy,
        clock.now(),
        system.orders.clone(),
        |_| {},
    )
    .unwrap();
    let mut paid_session = ReservationSession::begin(
        &snapshot(paid).await,
        &policy,
        clock.now(),
        system.orders.clone(),
        |_| {},
    )
    .unwrap();
    assert_eq!(abandoned_session.remaining(), Some(30));

    system.orders.complete(paid).await.unwrap();

    abandoned_session.expired().await;
    paid_session.expired().await;
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    assert_eq!(status(&system, abandoned).await, Some(OrderStatus::Canceled));
    assert_eq!(status(&system, paid).await, Some(OrderStatus::Completed));

    abandoned_session.end();
    paid_session.end();
    system.shutdown().await.unwrap();
}
