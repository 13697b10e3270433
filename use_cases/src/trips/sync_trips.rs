use super::{TripError, TripForm};
use crate::actor::Actor;
use crate::cities::CityCatalog;
use crate::trip_store::TripStore;
use crate::trip_validation::validate_trip;
use async_trait::async_trait;
use entities::trips::{Trip, TripId};
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SyncOutcome {
    Created { id: TripId },
    Updated { id: TripId },
    Failed { name: String, error: String },
}

#[async_trait]
pub trait SyncTripsInteractor: Send + Sync {
    /// Merges trips kept on a client into the owner's stored list.
    ///
    /// Forms carrying the id of an owned trip replace it, all others become new
    /// trips. Each form succeeds or fails on its own; the merged list is saved once.
    async fn sync(
        &self,
        actor: &dyn Actor,
        forms: Vec<TripForm>,
    ) -> Result<Vec<SyncOutcome>, TripError>;
}

pub struct SyncTripsInteractorImpl {
    store: Arc<dyn TripStore>,
    catalog: Arc<dyn CityCatalog>,
}

impl SyncTripsInteractorImpl {
    pub fn new(store: Arc<dyn TripStore>, catalog: Arc<dyn CityCatalog>) -> Self {
        Self { store, catalog }
    }

    fn merge(&self, trips: &mut Vec<Trip>, form: TripForm) -> Result<SyncOutcome, TripError> {
        let existing = form
            .id
            .as_deref()
            .and_then(|id| id.parse::<TripId>().ok())
            .and_then(|id| trips.iter().position(|trip| trip.id == id));

        match existing {
            Some(index) => {
                let trip = form.replace(&trips[index], self.catalog.as_ref())?;
                validate_trip(&trip)?;
                trips[index] = trip;
                Ok(SyncOutcome::Updated { id: trips[index].id })
            }
            None => {
                let trip = form.into_trip(self.catalog.as_ref())?;
                validate_trip(&trip)?;
                let id = trip.id;
                trips.push(trip);
                Ok(SyncOutcome::Created { id })
            }
        }
    }
}

#[async_trait]
impl SyncTripsInteractor for SyncTripsInteractorImpl {
    #[tracing::instrument(err, skip(self, actor, forms), fields(count = forms.len()), level = "info")]
    async fn sync(
        &self,
        actor: &dyn Actor,
        forms: Vec<TripForm>,
    ) -> Result<Vec<SyncOutcome>, TripError> {
        let owner = actor.user_id();
        let mut trips = self.store.load_trips(&owner).await?;

        let outcomes = forms
            .into_iter()
            .map(|form| {
                let name = form.name.clone();
                self.merge(&mut trips, form).unwrap_or_else(|err| {
                    tracing::warn!(trip = %name, "Trip could not be synced: {err}");
                    SyncOutcome::Failed {
                        name,
                        error: err.to_string(),
                    }
                })
            })
            .collect::<Vec<_>>();

        let changed = outcomes
            .iter()
            .any(|outcome| !matches!(outcome, SyncOutcome::Failed { .. }));
        if changed {
            self.store.save_trips(&owner, &trips).await?;
        }
        Ok(outcomes)
    }
}
