//! # Order Client
//!
//! High-level API for the `Order` actor. This is the order store as the sweepers see it:
//! `list_by_status`, `list_all`, `update_status`, `delete` and `save`.
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Order, OrderCreate, OrderId, OrderQuery, OrderStatus, OrderUpdate};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
///
/// Validation and ticket bookkeeping happen in the Order actor's hooks; this client only
/// builds requests and maps errors.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Places a Pending order and books one ticket per seat.
    #[instrument(skip(self, params), fields(showtime_id = %params.showtime_id, seats = params.seats.len()))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!(?params, "place_order called");
        info!("Sending place_order to actor");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn list_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        self.inner
            .list(Some(OrderQuery::Status(status)))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Order>, OrderError> {
        self.inner.list(None).await.map_err(Self::map_error)
    }

    /// Changes the order's status. Returns the order as stored after the change.
    #[instrument(skip(self))]
    pub async fn update_status(&self, id: OrderId, update: OrderUpdate) -> Result<Order, OrderError> {
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Marks the order paid online and issues its ticket codes.
    pub async fn complete(&self, id: OrderId) -> Result<Order, OrderError> {
        self.update_status(id, OrderUpdate::status(OrderStatus::Completed))
            .await
    }

    /// Marks the order paid and printed at the box office and issues its ticket codes.
    pub async fn print(&self, id: OrderId) -> Result<Order, OrderError> {
        self.update_status(id, OrderUpdate::status(OrderStatus::Printed))
            .await
    }

    pub async fn cancel(&self, id: OrderId) -> Result<Order, OrderError> {
        self.update_status(id, OrderUpdate::status(OrderStatus::Canceled))
            .await
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        OrderError::from(e)
    }
}
