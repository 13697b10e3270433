use super::{position_of, TripError};
use crate::actor::Actor;
use crate::trip_store::{PublicTripFinder, TripStore};
use async_trait::async_trait;
use entities::trips::{ShareToken, Trip, TripId};
use std::sync::Arc;

#[async_trait]
pub trait ShareTripInteractor: Send + Sync {
    /// Publishes or withdraws a trip. Returns the share token while published.
    async fn set_public(
        &self,
        actor: &dyn Actor,
        trip: TripId,
        public: bool,
    ) -> Result<Option<ShareToken>, TripError>;

    /// Looks up a published trip without authentication.
    async fn find_public(&self, token: ShareToken) -> Result<Trip, TripError>;
}

pub struct ShareTripInteractorImpl {
    store: Arc<dyn TripStore>,
    finder: Arc<dyn PublicTripFinder>,
}

impl ShareTripInteractorImpl {
    pub fn new(store: Arc<dyn TripStore>, finder: Arc<dyn PublicTripFinder>) -> Self {
        Self { store, finder }
    }
}

#[async_trait]
impl ShareTripInteractor for ShareTripInteractorImpl {
    #[tracing::instrument(err, skip(self, actor), level = "info")]
    async fn set_public(
        &self,
        actor: &dyn Actor,
        trip: TripId,
        public: bool,
    ) -> Result<Option<ShareToken>, TripError> {
        let owner = actor.user_id();
        let mut trips = self.store.load_trips(&owner).await?;
        let index = position_of(&trips, trip)?;

        let token = if public {
            Some(trips[index].publish())
        } else {
            trips[index].unpublish();
            None
        };

        self.store.save_trips(&owner, &trips).await?;
        Ok(token)
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn find_public(&self, token: ShareToken) -> Result<Trip, TripError> {
        self.finder
            .find_by_share_token(&token)
            .await?
            .ok_or(TripError::NotFound)
    }
}
