//! The persistence boundary for trips.
//!
//! Interactors only see [`TripStore`] and [`PublicTripFinder`]; whether the trips
//! end up in a key/value blob or in database rows is up to the adapter.

pub mod document;
pub mod in_memory;

use async_trait::async_trait;
use entities::trips::{ShareToken, Trip};
use entities::users::UserId;
#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait TripStore: Send + Sync {
    /// The owner's trips, in the order they were saved.
    async fn load_trips(&self, owner: &UserId) -> anyhow::Result<Vec<Trip>>;

    /// Replaces the owner's whole trip list.
    async fn save_trips(&self, owner: &UserId, trips: &[Trip]) -> anyhow::Result<()>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PublicTripFinder: Send + Sync {
    /// A published trip, regardless of owner. Unpublished trips are never returned.
    async fn find_by_share_token(&self, token: &ShareToken) -> anyhow::Result<Option<Trip>>;
}
