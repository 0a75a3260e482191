//! [`ActorEntity`] implementation for [`Ticket`].

use crate::framework::ActorEntity;
use crate::model::{Ticket, TicketCreate, TicketId, TicketQuery};
use crate::ticket_actor::{TicketAction, TicketError};
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
impl ActorEntity for Ticket {
    type Id = TicketId;
    type Create = TicketCreate;
    type Update = ();
    type Action = TicketAction;
    type ActionResult = String;
    type Query = TicketQuery;
    type Context = ();
    type Error = TicketError;

    fn from_create_params(id: TicketId, params: TicketCreate) -> Result<Self, TicketError> {
        if params.seat.trim().is_empty() {
            return Err(TicketError::ValidationError("seat is required".into()));
        }
        Ok(Self::new(id, params.order_id, params.showtime_id, params.seat))
    }

    fn matches(&self, query: &TicketQuery) -> bool {
        match query {
            TicketQuery::Order(order_id) => self.order_id == *order_id,
            TicketQuery::Showtime(showtime_id) => self.showtime_id == *showtime_id,
            TicketQuery::Unissued(showtime_id) => {
                self.showtime_id == *showtime_id && !self.is_issued()
            }
        }
    }

    /// Seat and showtime are fixed at creation; only the code ever changes.
    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), TicketError> {
        Ok(())
    }

    async fn handle_action(&mut self, action: TicketAction, _ctx: &()) -> Result<String, TicketError> {
        match action {
            TicketAction::IssueCode => {
                if let Some(code) = self.code.as_ref().filter(|c| !c.is_empty()) {
                    return Ok(code.clone());
                }
                let code = uuid::Uuid::new_v4().to_string();
                debug!(ticket_id = %self.id, %code, "Issued code");
                self.code = Some(code.clone());
                Ok(code)
            }
        }
    }
}
