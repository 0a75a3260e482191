//! Deletes dead rows: Canceled/Failed orders and tickets that can no longer be used.

use crate::clients::{OrderClient, ShowtimeClient, TicketClient};
use crate::clock::Clock;
use crate::framework::ActorClient;
use crate::model::{Order, Ticket};
use crate::order_actor::OrderError;
use crate::sweeper::{ItemOutcome, SweepError, SweepReport};
use crate::ticket_actor::TicketError;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[derive(Clone)]
pub struct CleanupSweeper {
    orders: OrderClient,
    tickets: TicketClient,
    showtimes: ShowtimeClient,
    clock: Arc<dyn Clock>,
}

impl CleanupSweeper {
    pub fn new(
        orders: OrderClient,
        tickets: TicketClient,
        showtimes: ShowtimeClient,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            orders,
            tickets,
            showtimes,
            clock,
        }
    }

    /// Runs both cleanup passes, terminal orders first.
    pub async fn sweep(&self) -> Result<SweepReport, SweepError> {
        let mut report = self.sweep_terminal_orders().await?;
        report.merge(self.sweep_stale_tickets().await?);
        Ok(report)
    }

    /// Deletes every Canceled or Failed order. The order actor deletes the order's
    /// tickets along with it.
    #[instrument(skip(self))]
    pub async fn sweep_terminal_orders(&self) -> Result<SweepReport, SweepError> {
        let orders = self.orders.list_all().await?;
        let mut report = SweepReport {
            examined: orders.len(),
            ..SweepReport::default()
        };
        for order in orders.iter().filter(|o| o.status.is_discardable()) {
            report.record(self.delete_order(order).await);
        }

        if report.transitioned > 0 || report.failed > 0 {
            info!(%report, "Terminal order sweep finished");
        } else {
            debug!(%report, "Terminal order sweep finished");
        }
        Ok(report)
    }

    /// Deletes tickets that never got a code and whose showtime has already started.
    ///
    /// A showtime whose tickets cannot be listed is counted as one failed item and the
    /// pass moves on to the next showtime.
    #[instrument(skip(self))]
    pub async fn sweep_stale_tickets(&self) -> Result<SweepReport, SweepError> {
        let now = self.clock.now();
        let started = self.showtimes.list_started_before(now).await?;

        let mut report = SweepReport::default();
        for showtime in &started {
            let stale = match self.tickets.list_unissued(showtime.id).await {
                Ok(tickets) => tickets,
                Err(e) => {
                    warn!(showtime_id = %showtime.id, error = %e, "Failed to list tickets");
                    report.failed += 1;
                    continue;
                }
            };
            report.examined += stale.len();
            for ticket in &stale {
                report.record(self.delete_ticket(ticket).await);
            }
        }

        if report.transitioned > 0 || report.failed > 0 {
            info!(showtimes = started.len(), %report, "Stale ticket sweep finished");
        } else {
            debug!(showtimes = started.len(), %report, "Stale ticket sweep finished");
        }
        Ok(report)
    }

    async fn delete_order(&self, order: &Order) -> ItemOutcome {
        let result = match self.orders.delete(order.id).await {
            Ok(()) => self.orders.save().await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => {
                debug!(order_id = %order.id, status = %order.status, "Order deleted");
                ItemOutcome::Done
            }
            Err(OrderError::NotFound(_)) => ItemOutcome::Skipped,
            Err(e) => {
                warn!(order_id = %order.id, error = %e, "Failed to delete order");
                ItemOutcome::Failed
            }
        }
    }

    async fn delete_ticket(&self, ticket: &Ticket) -> ItemOutcome {
        let result = match self.tickets.delete(ticket.id).await {
            Ok(()) => self.tickets.save().await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => {
                debug!(ticket_id = %ticket.id, showtime_id = %ticket.showtime_id, "Ticket deleted");
                ItemOutcome::Done
            }
            Err(TicketError::NotFound(_)) => ItemOutcome::Skipped,
            Err(e) => {
                warn!(ticket_id = %ticket.id, error = %e, "Failed to delete ticket");
                ItemOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::framework::mock::MockClient;
    use crate::framework::FrameworkError;
    use crate::model::{OrderId, OrderStatus, ShowtimeId, TicketId};
    use crate::sweeper::test_support::spawn_store;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_terminal_orders_and_their_tickets_are_deleted() {
        let store = spawn_store();
        let now = Utc::now();
        let showtime = store.showtime(now + Duration::hours(2)).await;
        let canceled = store.order(showtime, &["A1", "A2"], Some(now)).await;
        let failed = store.order(showtime, &["B1"], Some(now)).await;
        let completed = store.order(showtime, &["C1"], Some(now)).await;
        let pending = store.order(showtime, &["D1"], Some(now)).await;
        store.orders.cancel(canceled).await.unwrap();
        store
            .orders
            .update_status(failed, crate::model::OrderUpdate::status(OrderStatus::Failed))
            .await
            .unwrap();
        store.orders.complete(completed).await.unwrap();

        let sweeper = CleanupSweeper::new(
            store.orders.clone(),
            store.tickets.clone(),
            store.showtimes.clone(),
            Arc::new(ManualClock::new(now)),
        );
        let report = sweeper.sweep_terminal_orders().await.unwrap();

        assert_eq!(report.examined, 4);
        assert_eq!(report.transitioned, 2);
        assert!(store.orders.get(canceled).await.unwrap().is_none());
        assert!(store.orders.get(failed).await.unwrap().is_none());
        assert!(store.orders.get(completed).await.unwrap().is_some());
        assert!(store.orders.get(pending).await.unwrap().is_some());
        let left: Vec<String> = store
            .tickets
            .list_for_showtime(showtime)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.seat)
            .collect();
        assert_eq!(left, vec!["C1".to_string(), "D1".to_string()]);

        let again = sweeper.sweep_terminal_orders().await.unwrap();
        assert_eq!(again.transitioned, 0);
    }

    #[tokio::test]
    async fn test_stale_tickets_only_for_started_showtimes() {
        let store = spawn_store();
        let now = Utc::now();
        let past = store.showtime(now - Duration::minutes(5)).await;
        let future = store.showtime(now + Duration::hours(1)).await;

        let paid_past = store.order(past, &["A1"], Some(now)).await;
        store.orders.print(paid_past).await.unwrap();
        let unpaid_past = store.order(past, &["A2", "A3"], Some(now)).await;
        store.order(future, &["B1"], Some(now)).await;

        let sweeper = CleanupSweeper::new(
            store.orders.clone(),
            store.tickets.clone(),
            store.showtimes.clone(),
            Arc::new(ManualClock::new(now)),
        );
        let report = sweeper.sweep_stale_tickets().await.unwrap();

        assert_eq!(report.transitioned, 2);
        let past_tickets = store.tickets.list_for_showtime(past).await.unwrap();
        assert_eq!(past_tickets.len(), 1);
        assert!(past_tickets[0].is_issued());
        assert_eq!(store.tickets.list_for_showtime(future).await.unwrap().len(), 1);

        let again = sweeper.sweep_stale_tickets().await.unwrap();
        assert_eq!(again.transitioned, 0);
        assert_eq!(again.examined, 0);

        // the order still lists its swept tickets; deleting it must tolerate that
        store.orders.cancel(unpaid_past).await.unwrap();
        let report = sweeper.sweep_terminal_orders().await.unwrap();
        assert_eq!(report.transitioned, 1);
        assert_eq!(report.failed, 0);
    }

    #[tokio::test]
    async fn test_unlistable_showtime_does_not_stop_the_pass() {
        let now = Utc::now();
        let started = |id| crate::model::Showtime {
            id: ShowtimeId(id),
            movie: "Metropolis".into(),
            hall: "Hall 1".into(),
            start_at: now - Duration::minutes(10),
        };

        let mut showtimes = MockClient::<crate::model::Showtime>::new();
        showtimes.expect_list().return_ok(vec![started(1), started(2)]);
        let mut tickets = MockClient::<Ticket>::new();
        tickets.expect_list().return_err(FrameworkError::ActorDropped);
        tickets
            .expect_list()
            .return_ok(vec![Ticket::new(TicketId(7), OrderId(3), ShowtimeId(2), "E4")]);
        tickets.expect_delete(TicketId(7)).return_ok(());
        tickets.expect_flush().return_ok(());
        let orders = MockClient::<Order>::new();

        let sweeper = CleanupSweeper::new(
            OrderClient::new(orders.client()),
            TicketClient::new(tickets.client()),
            ShowtimeClient::new(showtimes.client()),
            Arc::new(ManualClock::new(now)),
        );
        let report = sweeper.sweep_stale_tickets().await.unwrap();

        assert_eq!(report.failed, 1);
        assert_eq!(report.examined, 1);
        assert_eq!(report.transitioned, 1);
        showtimes.verify();
        tickets.verify();
        orders.verify();
    }

    #[tokio::test]
    async fn test_failures_are_isolated_per_item() {
        let now = Utc::now();
        let mut canceled = Order::new(OrderId(1), "a@example.com", ShowtimeId(1), vec!["A1".into()], Some(now));
        canceled.status = OrderStatus::Canceled;
        let mut failed = canceled.clone();
        failed.id = OrderId(2);
        failed.status = OrderStatus::Failed;

        let mut orders = MockClient::<Order>::new();
        orders.expect_list().return_ok(vec![canceled, failed]);
        orders
            .expect_delete(OrderId(1))
            .return_err(FrameworkError::ActorDropped);
        orders.expect_delete(OrderId(2)).return_ok(());
        orders.expect_flush().return_ok(());

        let showtimes = MockClient::<crate::model::Showtime>::new();
        let mut tickets = MockClient::<Ticket>::new();
        let stale = Ticket::new(TicketId(9), OrderId(2), ShowtimeId(1), "A1");
        let sweeper = CleanupSweeper::new(
            OrderClient::new(orders.client()),
            TicketClient::new(tickets.client()),
            ShowtimeClient::new(showtimes.client()),
            Arc::new(ManualClock::new(now)),
        );

        let report = sweeper.sweep_terminal_orders().await.unwrap();
        assert_eq!(report.transitioned, 1);
        assert_eq!(report.failed, 1);
        orders.verify();

        // already removed by someone else: skipped, not failed
        tickets
            .expect_delete(TicketId(9))
            .return_err(FrameworkError::NotFound("ticket_9".into()));
        assert_eq!(sweeper.delete_ticket(&stale).await, ItemOutcome::Skipped);
        tickets.verify();
    }
}
