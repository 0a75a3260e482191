//! # ActorClient Trait
//!
//! Common interface for resource-specific clients: default `get`, `delete` and `save`
//! methods built on top of a generic [`ResourceClient`].
use crate::framework::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard store operations.
///
/// A client wraps a `ResourceClient<T>` and only has to say how transport errors map
/// onto its own error type:
///
/// ```rust,ignore
/// #[async_trait]
/// impl ActorClient<Showtime> for ShowtimeClient {
///     type Error = ShowtimeError;
///
///     fn inner(&self) -> &ResourceClient<Showtime> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         ShowtimeError::from(e)
///     }
/// }
///
/// // get(), delete() and save() are now available on ShowtimeClient.
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// Commit point. Resolves once every earlier write on this store has been applied.
    #[tracing::instrument(skip(self))]
    async fn save(&self) -> Result<(), Self::Error> {
        self.inner().flush().await.map_err(Self::map_error)
    }
}
