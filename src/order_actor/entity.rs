//! [`ActorEntity`] implementation for [`Order`].
//!
//! The order actor is the only actor with dependencies: it needs the Showtime actor to
//! validate new orders and the Ticket actor to create, finalize and delete the tickets
//! it owns.

use crate::clients::{ShowtimeClient, TicketClient};
use crate::framework::{ActorClient, ActorEntity};
use crate::model::{Order, OrderCreate, OrderId, OrderQuery, OrderUpdate, TicketCreate};
use crate::order_actor::OrderError;
use crate::ticket_actor::TicketError;
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::{debug, warn};

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = ();
    type ActionResult = ();
    type Query = OrderQuery;
    type Context = (TicketClient, ShowtimeClient);
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.customer.trim().is_empty() {
            return Err(OrderError::ValidationError("customer is required".into()));
        }
        if params.seats.is_empty() {
            return Err(OrderError::ValidationError("at least one seat is required".into()));
        }
        {
            let mut seen = HashSet::new();
            if let Some(dup) = params.seats.iter().find(|s| !seen.insert(s.as_str())) {
                return Err(OrderError::ValidationError(format!("seat {dup} booked twice")));
            }
        }
        Ok(Self::new(
            id,
            params.customer,
            params.showtime_id,
            params.seats,
            params.created_at,
        ))
    }

    fn matches(&self, query: &OrderQuery) -> bool {
        match query {
            OrderQuery::Status(status) => self.status == *status,
        }
    }

    /// Checks the showtime and creates one ticket per seat.
    ///
    /// If any ticket fails, the tickets created so far are deleted again before the
    /// error is returned.
    async fn on_create(&mut self, ctx: &Self::Context) -> Result<(), OrderError> {
        let (tickets, showtimes) = ctx;

        if showtimes.get(self.showtime_id).await?.is_none() {
            return Err(OrderError::InvalidShowtime(self.showtime_id.to_string()));
        }

        let mut created = Vec::with_capacity(self.seats.len());
        for seat in &self.seats {
            let params = TicketCreate {
                order_id: self.id,
                showtime_id: self.showtime_id,
                seat: seat.clone(),
            };
            match tickets.create_ticket(params).await {
                Ok(ticket_id) => created.push(ticket_id),
                Err(e) => {
                    for ticket_id in created {
                        if let Err(undo) = tickets.delete(ticket_id).await {
                            warn!(order_id = %self.id, %ticket_id, error = %undo, "Ticket rollback failed");
                        }
                    }
                    return Err(e.into());
                }
            }
        }
        self.tickets = created;
        Ok(())
    }

    /// Applies a status change.
    ///
    /// Order of checks: version, transition rules, then ticket finalization. Nothing on
    /// the order changes unless all three pass.
    async fn on_update(&mut self, update: OrderUpdate, ctx: &Self::Context) -> Result<(), OrderError> {
        let (tickets, _) = ctx;

        if let Some(expected) = update.expected_version {
            if expected != self.version {
                return Err(OrderError::VersionConflict {
                    expected,
                    actual: self.version,
                });
            }
        }
        if !self.status.can_transition_to(update.status) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: update.status,
            });
        }
        if update.status.issues_tickets() {
            for ticket_id in &self.tickets {
                tickets.issue_code(*ticket_id).await?;
            }
        }

        debug!(order_id = %self.id, from = %self.status, to = %update.status, "Status change");
        self.status = update.status;
        self.version += 1;
        Ok(())
    }

    /// Deletes the owned tickets. Tickets already removed by the stale ticket sweep are
    /// skipped.
    async fn on_delete(&self, ctx: &Self::Context) -> Result<(), OrderError> {
        let (tickets, _) = ctx;
        for ticket_id in &self.tickets {
            match tickets.delete(*ticket_id).await {
                Ok(()) | Err(TicketError::NotFound(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &Self::Context) -> Result<(), OrderError> {
        Ok(())
    }
}
