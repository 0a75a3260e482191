//! [`ActorEntity`] implementation for [`Showtime`].

use crate::framework::ActorEntity;
use crate::model::{Showtime, ShowtimeCreate, ShowtimeId, ShowtimeQuery};
use crate::showtime_actor::ShowtimeError;
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Showtime {
    type Id = ShowtimeId;
    type Create = ShowtimeCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Query = ShowtimeQuery;
    type Context = ();
    type Error = ShowtimeError;

    fn from_create_params(id: ShowtimeId, params: ShowtimeCreate) -> Result<Self, ShowtimeError> {
        if params.movie.trim().is_empty() {
            return Err(ShowtimeError::ValidationError("movie is required".into()));
        }
        Ok(Self {
            id,
            movie: params.movie,
            hall: params.hall,
            start_at: params.start_at,
        })
    }

    fn matches(&self, query: &ShowtimeQuery) -> bool {
        match query {
            ShowtimeQuery::StartedBefore(now) => self.has_started(*now),
        }
    }

    async fn on_update(&mut self, _update: (), _ctx: &Self::Context) -> Result<(), ShowtimeError> {
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &Self::Context) -> Result<(), ShowtimeError> {
        Ok(())
    }
}
