use chrono::NaiveDate;
use entities::cities::City;
use entities::trips::{Trip, TripStop};
use shared_kernel::date_time::calendar::add_days;

const DEFAULT_NIGHTS: i64 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddStopOutcome {
    Added { index: usize },
    /// The city is already part of the trip; nothing changed.
    Duplicate,
}

/// Where a stop appended now would arrive.
pub fn next_arrival(trip: &Trip) -> NaiveDate {
    trip.stops
        .last()
        .and_then(|previous| {
            previous
                .departure_date()
                .or_else(|| previous.arrival_date().map(|arrival| add_days(arrival, 1)))
        })
        .unwrap_or_else(|| trip.start_date())
}

#[tracing::instrument(skip(trip, city), fields(trip = %trip.id, city = %city.id))]
pub fn add_city(trip: &mut Trip, city: City) -> AddStopOutcome {
    if trip.contains_city(&city.id) {
        tracing::info!("city already in trip, skipping");
        return AddStopOutcome::Duplicate;
    }

    let arrival = next_arrival(trip);
    let departure = add_days(arrival, DEFAULT_NIGHTS);
    trip.stops.push(TripStop::scheduled(city, arrival, departure));

    AddStopOutcome::Added {
        index: trip.stops.len() - 1,
    }
}
