//! A customer's payment session for one Pending order.
//!
//! The session mirrors the server-side payment window on the client: it starts a
//! countdown seeded from the [`ExpiryPolicy`] and, when the countdown runs out, asks the
//! store to cancel the order. The countdown is advisory. If the order was paid or failed
//! by the sweep in the meantime, the cancel is rejected and nothing changes.

use crate::clients::OrderClient;
use crate::countdown::timer::CountdownHandle;
use crate::expiry::ExpiryPolicy;
use crate::framework::ActorClient;
use crate::model::{Order, OrderId, OrderStatus, OrderUpdate};
use crate::order_actor::OrderError;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

pub struct ReservationSession {
    order_id: OrderId,
    countdown: Option<CountdownHandle>,
}

impl ReservationSession {
    /// Starts the session for `order`.
    ///
    /// Orders without a creation time never expire, so their session has no countdown.
    /// Fails if the order is no longer Pending.
    pub fn begin<U>(
        order: &Order,
        policy: &ExpiryPolicy,
        now: DateTime<Utc>,
        orders: OrderClient,
        on_tick: U,
    ) -> Result<Self, OrderError>
    where
        U: FnMut(i64) + Send + 'static,
    {
        if order.status != OrderStatus::Pending {
            return Err(OrderError::ValidationError(format!(
                "{} is {}, not Pending",
                order.id, order.status
            )));
        }

        let countdown = policy.remaining(order.created_at, now).map(|seconds| {
            info!(order_id = %order.id, seconds, "Reservation session started");
            let (order_id, version) = (order.id, order.version);
            CountdownHandle::spawn_with_updates(seconds, on_tick, move || {
                tokio::spawn(cancel_expired(orders, order_id, version));
            })
        });

        Ok(Self {
            order_id: order.id,
            countdown,
        })
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// Seconds left on the countdown. `None` if the order never expires.
    pub fn remaining(&self) -> Option<i64> {
        self.countdown.as_ref().map(CountdownHandle::remaining)
    }

    /// Waits until the countdown has run out. Returns immediately if there is none, or
    /// once it has already been waited for.
    pub async fn expired(&mut self) {
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.finished().await;
        }
    }

    /// Ends the session and stops its countdown. Dropping the session does the same.
    pub fn end(self) {
        if let Some(countdown) = &self.countdown {
            countdown.cancel();
        }
        debug!(order_id = %self.order_id, "Reservation session ended");
    }
}

async fn cancel_expired(orders: OrderClient, order_id: OrderId, version: u64) {
    let update = OrderUpdate::checked(OrderStatus::Canceled, version);
    let result = match orders.update_status(order_id, update).await {
        Ok(_) => orders.save().await,
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => info!(%order_id, "Reservation timed out, order canceled"),
        Err(e) if e.is_stale_write() || matches!(e, OrderError::NotFound(_)) => {
            debug!(%order_id, error = %e, "Reservation timed out after order moved on")
        }
        Err(e) => warn!(%order_id, error = %e, "Failed to cancel timed out order"),
    }
}
