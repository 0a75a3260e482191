//! Fails Pending orders whose payment window has elapsed.

use crate::clients::OrderClient;
use crate::clock::Clock;
use crate::config::PaymentTimeoutSource;
use crate::framework::ActorClient;
use crate::model::{Order, OrderStatus, OrderUpdate};
use crate::order_actor::OrderError;
use crate::sweeper::{ItemOutcome, SweepError, SweepReport};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

#[derive(Clone)]
pub struct OrderSweeper {
    orders: OrderClient,
    timeout: Arc<dyn PaymentTimeoutSource>,
    clock: Arc<dyn Clock>,
}

impl OrderSweeper {
    pub fn new(
        orders: OrderClient,
        timeout: Arc<dyn PaymentTimeoutSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            orders,
            timeout,
            clock,
        }
    }

    /// One pass over the Pending orders.
    ///
    /// The timeout is read fresh and `now` is captured once, so every order in the pass
    /// is judged against the same instant. Each expired order is moved to Failed and
    /// saved before the next one is looked at. The write carries the version that was
    /// listed; if the order changed in between (paid, canceled, or failed by an
    /// overlapping run) the write is rejected and the order counts as skipped.
    #[instrument(skip(self))]
    pub async fn sweep_expired(&self) -> Result<SweepReport, SweepError> {
        let policy = self.timeout.payment_timeout().map_err(|e| {
            error!(error = %e, "Payment timeout unavailable, aborting order sweep");
            SweepError::from(e)
        })?;
        let now = self.clock.now();
        let pending = self.orders.list_by_status(OrderStatus::Pending).await?;

        let mut report = SweepReport {
            examined: pending.len(),
            ..SweepReport::default()
        };
        for order in pending
            .iter()
            .filter(|o| policy.is_expired(o.created_at, now))
        {
            report.record(self.fail(order).await);
        }

        if report.transitioned > 0 || report.failed > 0 {
            info!(%report, "Order sweep finished");
        } else {
            debug!(%report, "Order sweep finished");
        }
        Ok(report)
    }

    async fn fail(&self, order: &Order) -> ItemOutcome {
        let update = OrderUpdate::checked(OrderStatus::Failed, order.version);
        let result = match self.orders.update_status(order.id, update).await {
            Ok(_) => self.orders.save().await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => {
                debug!(order_id = %order.id, "Order expired");
                ItemOutcome::Done
            }
            Err(e) if e.is_stale_write() || matches!(e, OrderError::NotFound(_)) => {
                debug!(order_id = %order.id, error = %e, "Order changed since listing, skipped");
                ItemOutcome::Skipped
            }
            Err(e) => {
                warn!(order_id = %order.id, error = %e, "Failed to expire order");
                ItemOutcome::Failed
            }
        }
    }
}
