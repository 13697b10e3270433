use super::{position_of, resolve_city, StopEdit, TripError};
use crate::actor::Actor;
use crate::cities::CityCatalog;
use crate::itinerary::{add_city, AddStopOutcome};
use crate::trip_store::TripStore;
use crate::trip_validation::validate_trip;
use async_trait::async_trait;
use entities::cities::CityId;
use entities::trips::{Trip, TripId};
use std::sync::Arc;

#[async_trait]
pub trait TripStopsInteractor: Send + Sync {
    /// Appends a one-night stay after the last stop.
    async fn add_city(
        &self,
        actor: &dyn Actor,
        trip: TripId,
        city: CityId,
    ) -> Result<AddStopOutcome, TripError>;

    async fn remove_city(
        &self,
        actor: &dyn Actor,
        trip: TripId,
        city: CityId,
    ) -> Result<Trip, TripError>;

    async fn edit_stop(
        &self,
        actor: &dyn Actor,
        trip: TripId,
        city: CityId,
        edit: StopEdit,
    ) -> Result<Trip, TripError>;
}

pub struct TripStopsInteractorImpl {
    store: Arc<dyn TripStore>,
    catalog: Arc<dyn CityCatalog>,
}

impl TripStopsInteractorImpl {
    pub fn new(store: Arc<dyn TripStore>, catalog: Arc<dyn CityCatalog>) -> Self {
        Self { store, catalog }
    }
}

#[async_trait]
impl TripStopsInteractor for TripStopsInteractorImpl {
    #[tracing::instrument(err, skip(self, actor), level = "info")]
    async fn add_city(
        &self,
        actor: &dyn Actor,
        trip: TripId,
        city: CityId,
    ) -> Result<AddStopOutcome, TripError> {
        let owner = actor.user_id();
        let mut trips = self.store.load_trips(&owner).await?;
        let index = position_of(&trips, trip)?;
        // stops embed their city, so a duplicate is known without the catalog
        if trips[index].contains_city(&city) {
            tracing::info!(%city, "city already in trip, skipping");
            return Ok(AddStopOutcome::Duplicate);
        }

        let city = resolve_city(self.catalog.as_ref(), &city)?;
        let outcome = add_city(&mut trips[index], city);
        if outcome == AddStopOutcome::Duplicate {
            return Ok(outcome);
        }
        validate_trip(&trips[index])?;

        self.store.save_trips(&owner, &trips).await?;
        Ok(outcome)
    }

    #[tracing::instrument(err, skip(self, actor), level = "info")]
    async fn remove_city(
        &self,
        actor: &dyn Actor,
        trip: TripId,
        city: CityId,
    ) -> Result<Trip, TripError> {
        let owner = actor.user_id();
        let mut trips = self.store.load_trips(&owner).await?;
        let index = position_of(&trips, trip)?;

        trips[index]
            .remove_city(&city)
            .ok_or(TripError::StopNotFound(city))?;
        validate_trip(&trips[index])?;

        self.store.save_trips(&owner, &trips).await?;
        Ok(trips.swap_remove(index))
    }

    #[tracing::instrument(err, skip(self, actor), level = "info")]
    async fn edit_stop(
        &self,
        actor: &dyn Actor,
        trip: TripId,
        city: CityId,
        edit: StopEdit,
    ) -> Result<Trip, TripError> {
        let owner = actor.user_id();
        let mut trips = self.store.load_trips(&owner).await?;
        let index = position_of(&trips, trip)?;

        let stop = trips[index]
            .stop_mut(&city)
            .ok_or_else(|| TripError::StopNotFound(city.clone()))?;
        edit.apply(stop)?;
        validate_trip(&trips[index])?;

        self.store.save_trips(&owner, &trips).await?;
        Ok(trips.swap_remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cities::MockCityCatalog;
    use crate::trip_store::in_memory::InMemoryStore;
    use crate::trip_validation::TripValidationError;
    use crate::trips::test_support::{actor, catalog, date, june_trip, owner};
    use entities::cities::City;
    use entities::trips::TripStop;

    async fn seeded(trip: &Trip) -> (InMemoryStore, TripStopsInteractorImpl) {
        let store = InMemoryStore::new();
        store.save_trips(&owner(), &[trip.clone()]).await.unwrap();
        let interactor = TripStopsInteractorImpl::new(Arc::new(store.clone()), Arc::new(catalog()));
        (store, interactor)
    }

    async fn stored(store: &InMemoryStore) -> Trip {
        store.load_trips(&owner()).await.unwrap().remove(0)
    }

    #[tokio::test]
    async fn test_added_cities_are_chained_one_night_stays() {
        let trip = june_trip("Loop");
        let (store, interactor) = seeded(&trip).await;

        for (expected_index, city) in ["paris", "brussels", "amsterdam"].into_iter().enumerate() {
            let outcome = interactor
                .add_city(&actor(), trip.id, CityId::from(city))
                .await
                .unwrap();
            assert_eq!(
                outcome,
                AddStopOutcome::Added {
                    index: expected_index
                }
            );
        }

        let trip = stored(&store).await;
        let dates = trip
            .stops
            .iter()
            .map(|stop| (stop.arrival_date().unwrap(), stop.nights()))
            .collect::<Vec<_>>();
        assert_eq!(
            dates,
            vec![(date(6, 1), 1), (date(6, 2), 1), (date(6, 3), 1)]
        );
    }

    #[tokio::test]
    async fn test_duplicate_city_changes_nothing() {
        let trip = june_trip("Loop");
        let (store, interactor) = seeded(&trip).await;
        interactor
            .add_city(&actor(), trip.id, CityId::from("paris"))
            .await
            .unwrap();
        let before = stored(&store).await;

        let outcome = interactor
            .add_city(&actor(), trip.id, CityId::from("paris"))
            .await
            .unwrap();

        assert_eq!(outcome, AddStopOutcome::Duplicate);
        assert_eq!(stored(&store).await, before);
    }

    #[tokio::test]
    async fn test_city_dropped_from_the_catalog_is_still_a_duplicate() {
        let mut trip = june_trip("Loop");
        trip.stops.push(TripStop::scheduled(
            City::new("hallstatt", "Hallstatt", "Austria", 47.56, 13.65),
            date(6, 1),
            date(6, 2),
        ));
        let store = InMemoryStore::new();
        store.save_trips(&owner(), &[trip.clone()]).await.unwrap();
        let mut catalog = MockCityCatalog::new();
        catalog.expect_get_city_by_id().never();
        let interactor = TripStopsInteractorImpl::new(Arc::new(store.clone()), Arc::new(catalog));

        let outcome = interactor
            .add_city(&actor(), trip.id, CityId::from("hallstatt"))
            .await
            .unwrap();

        assert_eq!(outcome, AddStopOutcome::Duplicate);
        assert_eq!(stored(&store).await, trip);
    }

    #[tokio::test]
    async fn test_unknown_city_is_rejected() {
        let trip = june_trip("Loop");
        let (_, interactor) = seeded(&trip).await;

        let result = interactor
            .add_city(&actor(), trip.id, CityId::from("atlantis"))
            .await;

        assert!(matches!(result, Err(TripError::UnknownCity(_))));
    }

    #[tokio::test]
    async fn test_add_past_the_trip_end_is_rejected() {
        let mut trip = june_trip("Loop");
        trip.dates.to = date(6, 2);
        let (store, interactor) = seeded(&trip).await;
        interactor
            .add_city(&actor(), trip.id, CityId::from("paris"))
            .await
            .unwrap();

        let result = interactor
            .add_city(&actor(), trip.id, CityId::from("berlin"))
            .await;

        assert!(matches!(
            result,
            Err(TripError::Validation(
                TripValidationError::DepartureAfterTripEnd { .. }
            ))
        ));
        assert_eq!(stored(&store).await.stops.len(), 1);
    }

    #[tokio::test]
    async fn test_edit_and_remove_stops() {
        let trip = june_trip("Loop");
        let (store, interactor) = seeded(&trip).await;
        for city in ["paris", "berlin"] {
            interactor
                .add_city(&actor(), trip.id, CityId::from(city))
                .await
                .unwrap();
        }

        let edited = interactor
            .edit_stop(
                &actor(),
                trip.id,
                CityId::from("berlin"),
                StopEdit {
                    nights: Some(3),
                    ..StopEdit::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(edited.stops[1].departure_date(), Some(date(6, 5)));

        let remaining = interactor
            .remove_city(&actor(), trip.id, CityId::from("paris"))
            .await
            .unwrap();
        assert_eq!(remaining.stops.len(), 1);
        assert_eq!(stored(&store).await, remaining);
    }

    #[tokio::test]
    async fn test_missing_stop_is_reported() {
        let trip = june_trip("Loop");
        let (_, interactor) = seeded(&trip).await;

        let result = interactor
            .remove_city(&actor(), trip.id, CityId::from("paris"))
            .await;

        assert!(matches!(result, Err(TripError::StopNotFound(_))));
    }
}
