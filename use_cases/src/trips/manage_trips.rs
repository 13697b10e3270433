use super::{position_of, TripError, TripForm};
use crate::actor::Actor;
use crate::cities::CityCatalog;
use crate::trip_store::TripStore;
use crate::trip_validation::validate_trip;
use async_trait::async_trait;
use entities::trips::{Trip, TripId};
use std::sync::Arc;

#[async_trait]
pub trait ManageTripsInteractor: Send + Sync {
    async fn list(&self, actor: &dyn Actor) -> Result<Vec<Trip>, TripError>;

    async fn get(&self, actor: &dyn Actor, id: TripId) -> Result<Trip, TripError>;

    async fn create(&self, actor: &dyn Actor, form: TripForm) -> Result<Trip, TripError>;

    async fn update(
        &self,
        actor: &dyn Actor,
        id: TripId,
        form: TripForm,
    ) -> Result<Trip, TripError>;

    async fn delete(&self, actor: &dyn Actor, id: TripId) -> Result<(), TripError>;
}

pub struct ManageTripsInteractorImpl {
    store: Arc<dyn TripStore>,
    catalog: Arc<dyn CityCatalog>,
}

impl ManageTripsInteractorImpl {
    pub fn new(store: Arc<dyn TripStore>, catalog: Arc<dyn CityCatalog>) -> Self {
        Self { store, catalog }
    }
}

#[async_trait]
impl ManageTripsInteractor for ManageTripsInteractorImpl {
    #[tracing::instrument(err, skip(self, actor), level = "info")]
    async fn list(&self, actor: &dyn Actor) -> Result<Vec<Trip>, TripError> {
        Ok(self.store.load_trips(&actor.user_id()).await?)
    }

    #[tracing::instrument(err, skip(self, actor), level = "info")]
    async fn get(&self, actor: &dyn Actor, id: TripId) -> Result<Trip, TripError> {
        self.store
            .load_trips(&actor.user_id())
            .await?
            .into_iter()
            .find(|trip| trip.id == id)
            .ok_or(TripError::NotFound)
    }

    #[tracing::instrument(err, skip(self, actor, form), level = "info")]
    async fn create(&self, actor: &dyn Actor, form: TripForm) -> Result<Trip, TripError> {
        let trip = form.into_trip(self.catalog.as_ref())?;
        validate_trip(&trip)?;

        let owner = actor.user_id();
        let mut trips = self.store.load_trips(&owner).await?;
        trips.push(trip.clone());
        self.store.save_trips(&owner, &trips).await?;
        Ok(trip)
    }

    #[tracing::instrument(err, skip(self, actor, form), level = "info")]
    async fn update(
        &self,
        actor: &dyn Actor,
        id: TripId,
        form: TripForm,
    ) -> Result<Trip, TripError> {
        let owner = actor.user_id();
        let mut trips = self.store.load_trips(&owner).await?;
        let index = position_of(&trips, id)?;

        let trip = form.replace(&trips[index], self.catalog.as_ref())?;
        validate_trip(&trip)?;

        trips[index] = trip.clone();
        self.store.save_trips(&owner, &trips).await?;
        Ok(trip)
    }

    #[tracing::instrument(err, skip(self, actor), level = "info")]
    async fn delete(&self, actor: &dyn Actor, id: TripId) -> Result<(), TripError> {
        let owner = actor.user_id();
        let mut trips = self.store.load_trips(&owner).await?;
        let index = position_of(&trips, id)?;

        trips.remove(index);
        self.store.save_trips(&owner, &trips).await?;
        Ok(())
    }
}
