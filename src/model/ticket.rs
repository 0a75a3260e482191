use crate::model::{OrderId, ShowtimeId};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TicketId(pub u32);

impl From<u32> for TicketId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ticket_{}", self.0)
    }
}

/// One seat at one showtime, owned by an order.
///
/// A ticket without a code has not been finalized yet. Codes are issued when the
/// owning order is completed or printed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub order_id: OrderId,
    pub showtime_id: ShowtimeId,
    pub seat: String,
    pub code: Option<String>,
}

impl Ticket {
    pub fn new(
        id: TicketId,
        order_id: OrderId,
        showtime_id: ShowtimeId,
        seat: impl Into<String>,
    ) -> Self {
        Self {
            id,
            order_id,
            showtime_id,
            seat: seat.into(),
            code: None,
        }
    }

    /// An empty string counts as no code.
    pub fn is_issued(&self) -> bool {
        self.code.as_deref().is_some_and(|c| !c.is_empty())
    }
}

/// Payload for creating a new ticket.
#[derive(Debug, Clone)]
pub struct TicketCreate {
    pub order_id: OrderId,
    pub showtime_id: ShowtimeId,
    pub seat: String,
}

/// Filters for listing tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketQuery {
    Order(OrderId),
    Showtime(ShowtimeId),
    /// Tickets of a showtime that never received a code.
    Unissued(ShowtimeId),
}
