//! # Generic Messages
//!
//! Message types exchanged between a [`ResourceClient`](crate::framework::ResourceClient)
//! and its [`ResourceActor`](crate::framework::ResourceActor).

use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants are the store operations every resource supports:
///
/// - **Create**: uses [`ActorEntity::Create`] to initialize a new resource.
/// - **Get**: fetches the current state of one resource by ID.
/// - **List**: snapshot of every resource matching an optional [`ActorEntity::Query`].
/// - **Update**: applies an [`ActorEntity::Update`] to an existing resource.
/// - **Delete**: removes the resource.
/// - **Action**: executes a custom [`ActorEntity::Action`].
/// - **Flush**: commit barrier. Answered once every request queued before it has been
///   applied.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        query: Option<T::Query>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Flush {
        respond_to: Response<()>,
    },
}
