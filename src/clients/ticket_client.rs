//! # Ticket Client
//!
//! High-level API for the `Ticket` actor.
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{OrderId, ShowtimeId, Ticket, TicketCreate, TicketId, TicketQuery};
use crate::ticket_actor::{TicketAction, TicketError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Ticket actor.
#[derive(Clone)]
pub struct TicketClient {
    inner: ResourceClient<Ticket>,
}

impl TicketClient {
    pub fn new(inner: ResourceClient<Ticket>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_ticket(&self, params: TicketCreate) -> Result<TicketId, TicketError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Returns the ticket's code, assigning one first if it has none.
    #[instrument(skip(self))]
    pub async fn issue_code(&self, id: TicketId) -> Result<String, TicketError> {
        self.inner
            .perform_action(id, TicketAction::IssueCode)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn list_for_order(&self, order_id: OrderId) -> Result<Vec<Ticket>, TicketError> {
        self.list(TicketQuery::Order(order_id)).await
    }

    #[instrument(skip(self))]
    pub async fn list_for_showtime(
        &self,
        showtime_id: ShowtimeId,
    ) -> Result<Vec<Ticket>, TicketError> {
        self.list(TicketQuery::Showtime(showtime_id)).await
    }

    /// Tickets of `showtime_id` that never received a code.
    #[instrument(skip(self))]
    pub async fn list_unissued(&self, showtime_id: ShowtimeId) -> Result<Vec<Ticket>, TicketError> {
        self.list(TicketQuery::Unissued(showtime_id)).await
    }

    async fn list(&self, query: TicketQuery) -> Result<Vec<Ticket>, TicketError> {
        self.inner.list(Some(query)).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Ticket> for TicketClient {
    type Error = TicketError;

    fn inner(&self) -> &ResourceClient<Ticket> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        TicketError::from(e)
    }
}
