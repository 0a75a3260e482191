//! # Showtime Client
//!
//! High-level API for the `Showtime` actor.
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Showtime, ShowtimeCreate, ShowtimeId, ShowtimeQuery};
use crate::showtime_actor::ShowtimeError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

/// Client for interacting with the Showtime actor.
#[derive(Clone)]
pub struct ShowtimeClient {
    inner: ResourceClient<Showtime>,
}

impl ShowtimeClient {
    pub fn new(inner: ResourceClient<Showtime>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_showtime(&self, params: ShowtimeCreate) -> Result<ShowtimeId, ShowtimeError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Showtimes whose start time is strictly before `now`.
    #[instrument(skip(self))]
    pub async fn list_started_before(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Showtime>, ShowtimeError> {
        self.inner
            .list(Some(ShowtimeQuery::StartedBefore(now)))
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Showtime> for ShowtimeClient {
    type Error = ShowtimeError;

    fn inner(&self) -> &ResourceClient<Showtime> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        ShowtimeError::from(e)
    }
}
