use crate::clients::{OrderClient, ShowtimeClient, TicketClient};
use crate::clock::{Clock, SystemClock};
use crate::config::{BookingConfig, PaymentTimeoutSource};
use crate::lifecycle::retry::RetryPolicy;
use crate::lifecycle::scheduler::spawn_periodic;
use crate::sweeper::{CleanupSweeper, OrderSweeper};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Runtime orchestrator for the booking backend.
///
/// `BookingSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping the store actors and the sweep jobs
/// - **Dependency Wiring**: the Order actor gets the Ticket and Showtime clients as its context
/// - **Scheduling**: the order sweep and the cleanup sweep run as independent periodic jobs
///
/// # Example
///
/// ```ignore
/// let mut system = BookingSystem::new();
/// system.start_sweepers(&BookingConfig::from_env(), Arc::new(EnvPaymentTimeout::default()));
///
/// let showtime_id = system.showtimes.create_showtime(showtime).await?;
/// let order_id = system.orders.place_order(order).await?;
///
/// system.shutdown().await?;
/// ```
pub struct BookingSystem {
    pub orders: OrderClient,
    pub tickets: TicketClient,
    pub showtimes: ShowtimeClient,

    clock: Arc<dyn Clock>,
    shutdown: watch::Sender<bool>,

    /// Sweep jobs. Stopped through `shutdown` before the actors are released.
    jobs: Vec<JoinHandle<()>>,

    /// Actor tasks. Each ends once every client of its store has been dropped.
    handles: Vec<JoinHandle<()>>,
}

impl Default for BookingSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingSystem {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Spawns the Showtime, Ticket and Order actors. Sweeps are started separately with
    /// [`start_sweepers`](Self::start_sweepers).
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let (showtime_actor, showtimes) = crate::showtime_actor::new();
        let (ticket_actor, tickets) = crate::ticket_actor::new();
        let (order_actor, orders) = crate::order_actor::new();

        let showtime_handle = tokio::spawn(showtime_actor.run(()));
        let ticket_handle = tokio::spawn(ticket_actor.run(()));
        // Context = (TicketClient, ShowtimeClient)
        let order_handle = tokio::spawn(order_actor.run((tickets.clone(), showtimes.clone())));

        let (shutdown, _) = watch::channel(false);

        Self {
            orders,
            tickets,
            showtimes,
            clock,
            shutdown,
            jobs: Vec::new(),
            handles: vec![order_handle, ticket_handle, showtime_handle],
        }
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    pub fn order_sweeper(&self, timeout: Arc<dyn PaymentTimeoutSource>) -> OrderSweeper {
        OrderSweeper::new(self.orders.clone(), timeout, self.clock.clone())
    }

    pub fn cleanup_sweeper(&self) -> CleanupSweeper {
        CleanupSweeper::new(
            self.orders.clone(),
            self.tickets.clone(),
            self.showtimes.clone(),
            self.clock.clone(),
        )
    }

    /// Starts the order sweep and the cleanup sweep as background jobs.
    pub fn start_sweepers(
        &mut self,
        config: &BookingConfig,
        timeout: Arc<dyn PaymentTimeoutSource>,
    ) {
        let retry = RetryPolicy::default().with_max_attempts(config.sweep_max_attempts);

        let order_sweeper = self.order_sweeper(timeout);
        self.jobs.push(spawn_periodic(
            "order_sweep",
            config.order_sweep_interval,
            retry.clone(),
            self.shutdown.subscribe(),
            move || {
                let sweeper = order_sweeper.clone();
                async move { sweeper.sweep_expired().await }
            },
        ));

        let cleanup_sweeper = self.cleanup_sweeper();
        self.jobs.push(spawn_periodic(
            "cleanup_sweep",
            config.cleanup_sweep_interval,
            retry,
            self.shutdown.subscribe(),
            move || {
                let sweeper = cleanup_sweeper.clone();
                async move { sweeper.sweep().await }
            },
        ));

        info!(
            order_interval = ?config.order_sweep_interval,
            cleanup_interval = ?config.cleanup_sweep_interval,
            "Sweepers started"
        );
    }

    /// Gracefully shuts down the jobs, then the actors.
    ///
    /// 1. Signals the sweep jobs and waits for them (a run in progress finishes first).
    /// 2. Drops the clients held here, closing the actors' channels.
    /// 3. Waits for every actor task.
    ///
    /// Clients cloned out of the system (e.g. held by a live `ReservationSession`) keep
    /// their actor running, so drop them before calling this.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down booking system...");

        let _ = self.shutdown.send(true);
        for job in self.jobs {
            if let Err(e) = job.await {
                error!("Sweep job failed: {:?}", e);
                return Err(format!("Sweep job failed: {:?}", e));
            }
        }

        drop(self.orders);
        drop(self.tickets);
        drop(self.showtimes);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Booking system shutdown complete.");
        Ok(())
    }
}
