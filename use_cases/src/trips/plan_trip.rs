use super::forms::{parse_trip_dates, parse_trip_name};
use super::{resolve_city, PlanTripInput, TripError};
use crate::actor::Actor;
use crate::cities::CityCatalog;
use crate::itinerary::{distribute_stops, fits_in};
use crate::trip_store::TripStore;
use crate::trip_validation::validate_trip;
use async_trait::async_trait;
use entities::cities::CityId;
use entities::trips::Trip;
use itertools::Itertools;
use shared_kernel::date_time::calendar::days_between;
use std::sync::Arc;

#[async_trait]
pub trait PlanTripInteractor: Send + Sync {
    /// Creates a trip whose stops are spread evenly over its dates.
    async fn plan(&self, actor: &dyn Actor, input: PlanTripInput) -> Result<Trip, TripError>;
}

pub struct PlanTripInteractorImpl {
    store: Arc<dyn TripStore>,
    catalog: Arc<dyn CityCatalog>,
}

impl PlanTripInteractorImpl {
    pub fn new(store: Arc<dyn TripStore>, catalog: Arc<dyn CityCatalog>) -> Self {
        Self { store, catalog }
    }
}

#[async_trait]
impl PlanTripInteractor for PlanTripInteractorImpl {
    #[tracing::instrument(err, skip(self, actor), level = "info")]
    async fn plan(&self, actor: &dyn Actor, input: PlanTripInput) -> Result<Trip, TripError> {
        let name = parse_trip_name(input.name)?;
        let dates = parse_trip_dates(&input.start_date, &input.end_date)?;
        let cities = input
            .city_ids
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .unique()
            .map(|id| resolve_city(self.catalog.as_ref(), &CityId::from(id)))
            .collect::<Result<Vec<_>, _>>()?;
        if dates.is_forward() && !fits_in(&dates, cities.len()) {
            return Err(TripError::TooManyCities {
                cities: cities.len(),
                needed: cities.len() - 1,
                days: days_between(dates.from, dates.to),
            });
        }

        let mut trip = Trip::new(name, dates);
        trip.notes = input.notes.filter(|notes| !notes.trim().is_empty());
        trip.travelers = input.travelers;
        trip.stops = distribute_stops(cities, &trip.dates);
        validate_trip(&trip)?;

        let owner = actor.user_id();
        let mut trips = self.store.load_trips(&owner).await?;
        trips.push(trip.clone());
        self.store.save_trips(&owner, &trips).await?;
        Ok(trip)
    }
}
