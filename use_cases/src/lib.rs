use crate::cities::{CityCatalog, ListCitiesInteractor, ListCitiesInteractorImpl};
use crate::profile::{ProfileInteractor, ProfileInteractorImpl};
use crate::repositories::Repository;
use crate::trips::{
    ManageTripsInteractor, ManageTripsInteractorImpl, PlanTripInteractor, PlanTripInteractorImpl,
    ShareTripInteractor, ShareTripInteractorImpl, SyncTripsInteractor, SyncTripsInteractorImpl,
    TripStopsInteractor, TripStopsInteractorImpl,
};
use std::sync::Arc;

pub mod actor;
pub mod cities;
pub mod itinerary;
pub mod profile;
pub mod repositories;
pub mod trip_store;
pub mod trip_validation;
pub mod trips;

pub trait App: Send + Sync {
    fn cities(&self) -> &dyn ListCitiesInteractor;
    fn profile(&self) -> &dyn ProfileInteractor;
    fn manage_trips(&self) -> &dyn ManageTripsInteractor;
    fn plan_trip(&self) -> &dyn PlanTripInteractor;
    fn trip_stops(&self) -> &dyn TripStopsInteractor;
    fn sync_trips(&self) -> &dyn SyncTripsInteractor;
    fn share_trip(&self) -> &dyn ShareTripInteractor;
}

pub struct AppImpl {
    cities: Arc<dyn ListCitiesInteractor>,
    profile: Arc<dyn ProfileInteractor>,
    manage_trips: Arc<dyn ManageTripsInteractor>,
    plan_trip: Arc<dyn PlanTripInteractor>,
    trip_stops: Arc<dyn TripStopsInteractor>,
    sync_trips: Arc<dyn SyncTripsInteractor>,
    share_trip: Arc<dyn ShareTripInteractor>,
}

impl App for AppImpl {
    fn cities(&self) -> &dyn ListCitiesInteractor {
        self.cities.as_ref()
    }

    fn profile(&self) -> &dyn ProfileInteractor {
        self.profile.as_ref()
    }

    fn manage_trips(&self) -> &dyn ManageTripsInteractor {
        self.manage_trips.as_ref()
    }

    fn plan_trip(&self) -> &dyn PlanTripInteractor {
        self.plan_trip.as_ref()
    }

    fn trip_stops(&self) -> &dyn TripStopsInteractor {
        self.trip_stops.as_ref()
    }

    fn sync_trips(&self) -> &dyn SyncTripsInteractor {
        self.sync_trips.as_ref()
    }

    fn share_trip(&self) -> &dyn ShareTripInteractor {
        self.share_trip.as_ref()
    }
}

impl AppImpl {
    pub fn new<R: Repository + 'static>(repo: R, catalog: Arc<dyn CityCatalog>) -> Self {
        let repository = Arc::new(repo);

        Self {
            cities: Arc::new(ListCitiesInteractorImpl::new(catalog.clone())),
            profile: Arc::new(ProfileInteractorImpl::new(
                repository.clone(),
                catalog.clone(),
            )),
            manage_trips: Arc::new(ManageTripsInteractorImpl::new(
                repository.clone(),
                catalog.clone(),
            )),
            plan_trip: Arc::new(PlanTripInteractorImpl::new(
                repository.clone(),
                catalog.clone(),
            )),
            trip_stops: Arc::new(TripStopsInteractorImpl::new(
                repository.clone(),
                catalog.clone(),
            )),
            sync_trips: Arc::new(SyncTripsInteractorImpl::new(repository.clone(), catalog)),
            share_trip: Arc::new(ShareTripInteractorImpl::new(
                repository.clone(),
                repository,
            )),
        }
    }
}
