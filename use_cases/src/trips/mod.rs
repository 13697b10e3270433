//! Trip interactors. Every write loads the owner's list, changes it, runs the
//! validator and replaces the stored list in a single save.

mod forms;
mod manage_trips;
mod plan_trip;
mod share_trip;
mod sync_trips;
mod trip_stops;

pub use forms::{PlanTripInput, StopEdit, StopForm, TripForm};
pub use manage_trips::{ManageTripsInteractor, ManageTripsInteractorImpl};
pub use plan_trip::{PlanTripInteractor, PlanTripInteractorImpl};
pub use share_trip::{ShareTripInteractor, ShareTripInteractorImpl};
pub use sync_trips::{SyncOutcome, SyncTripsInteractor, SyncTripsInteractorImpl};
pub use trip_stops::{TripStopsInteractor, TripStopsInteractorImpl};

use crate::cities::CityCatalog;
use crate::trip_validation::TripValidationError;
use entities::cities::{City, CityId};
use entities::trips::{StopError, Trip, TripId};
use shared_kernel::date_time::calendar::ParseDateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TripError {
    #[error("Trip not found")]
    NotFound,
    #[error("{0} is not a stop of this trip")]
    StopNotFound(CityId),
    #[error("City with ID {0} not found")]
    UnknownCity(CityId),
    #[error(transparent)]
    Validation(#[from] TripValidationError),
    #[error(transparent)]
    InvalidDate(#[from] ParseDateError),
    #[error(transparent)]
    Stop(#[from] StopError),
    #[error("{cities} cities need at least {needed} days, but the trip only lasts {days}")]
    TooManyCities { cities: usize, needed: usize, days: i64 },
    #[error("{0}")]
    InvalidInput(String),
    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

fn resolve_city(catalog: &dyn CityCatalog, id: &CityId) -> Result<City, TripError> {
    catalog
        .get_city_by_id(id)
        .ok_or_else(|| TripError::UnknownCity(id.clone()))
}

fn position_of(trips: &[Trip], id: TripId) -> Result<usize, TripError> {
    trips
        .iter()
        .position(|trip| trip.id == id)
        .ok_or(TripError::NotFound)
}
