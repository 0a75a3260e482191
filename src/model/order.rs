//! A customer's booking of one or more seats at a showtime.
//!
//! # Actor Framework
//! This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
//! allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
//!
//! See [`impl ActorEntity for Order`](#impl-ActorEntity-for-Order) for details on:
//! - Creation parameters ([`OrderCreate`])
//! - Update parameters ([`OrderUpdate`])
//! - List filters ([`OrderQuery`])

use crate::model::{ShowtimeId, TicketId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Lifecycle state of an order.
///
/// `Pending` is the only non-terminal state. Every other state is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Awaiting payment within the timeout window.
    Pending,
    /// Paid online.
    Completed,
    /// Paid and printed at the box office.
    Printed,
    /// Abandoned by the customer.
    Canceled,
    /// Payment window elapsed.
    Failed,
}

impl OrderStatus {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, OrderStatus::Pending)
    }

    /// Terminal states whose orders are physically removed by the cleanup sweep.
    pub const fn is_discardable(self) -> bool {
        matches!(self, OrderStatus::Canceled | OrderStatus::Failed)
    }

    /// Reaching this state finalizes the order's tickets (codes are issued).
    pub const fn issues_tickets(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Printed)
    }

    pub const fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        match (self, next) {
            (Pending, Completed | Printed | Canceled | Failed) => true,
            (Pending, Pending) => false,
            (Completed | Printed | Canceled | Failed, _) => false,
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Completed => "Completed",
            OrderStatus::Printed => "Printed",
            OrderStatus::Canceled => "Canceled",
            OrderStatus::Failed => "Failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: String,
    pub showtime_id: ShowtimeId,
    pub status: OrderStatus,
    /// Seat labels, one ticket each.
    pub seats: Vec<String>,
    /// `None` for orders imported without a timestamp. Such orders never expire.
    pub created_at: Option<DateTime<Utc>>,
    /// Owned tickets, in the same order as `seats`.
    pub tickets: Vec<TicketId>,
    /// Bumped on every accepted status change.
    pub version: u64,
}

/// Payload for placing a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer: String,
    pub showtime_id: ShowtimeId,
    pub seats: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for a status change.
///
/// With `expected_version` set, the update only applies if the stored order still has
/// that version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderUpdate {
    pub status: OrderStatus,
    pub expected_version: Option<u64>,
}

impl OrderUpdate {
    /// Unconditional status change (last write wins, subject to the transition rules).
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status,
            expected_version: None,
        }
    }

    /// Status change guarded by the version the caller last read.
    pub fn checked(status: OrderStatus, expected_version: u64) -> Self {
        Self {
            status,
            expected_version: Some(expected_version),
        }
    }
}

/// Filters for listing orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderQuery {
    Status(OrderStatus),
}

impl Order {
    /// Creates a new Pending order with no tickets yet.
    ///
    /// Tickets are attached by the order actor's `on_create` hook.
    pub fn new(
        id: OrderId,
        customer: impl Into<String>,
        showtime_id: ShowtimeId,
        seats: Vec<String>,
        created_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            customer: customer.into(),
            showtime_id,
            status: OrderStatus::Pending,
            seats,
            created_at,
            tickets: Vec::new(),
            version: 0,
        }
    }
}
