use entities::cities::City;
use entities::trips::{Trip, TripStop};
use serde::Serialize;
use shared_kernel::date_time::calendar::{format_date, to_iso_string};

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StopView {
    city_id: String,
    city: City,
    arrival_date: Option<String>,
    departure_date: Option<String>,
    nights: u32,
    accommodation: Option<String>,
    notes: Option<String>,
    is_stopover: bool,
    /// Human readable dates, `N/A` when unset.
    arrival_label: String,
    departure_label: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TripView {
    id: String,
    name: String,
    start_date: String,
    end_date: String,
    date_range: String,
    notes: Option<String>,
    travelers: Option<u32>,
    budget: Option<f64>,
    stops: Vec<StopView>,
    is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    share_token: Option<String>,
}

impl From<&TripStop> for StopView {
    fn from(stop: &TripStop) -> Self {
        StopView {
            city_id: stop.city_id().inner(),
            city: stop.city.clone(),
            arrival_date: stop.arrival_date().map(to_iso_string),
            departure_date: stop.departure_date().map(to_iso_string),
            nights: stop.nights(),
            accommodation: stop.accommodation.clone(),
            notes: stop.notes.clone(),
            is_stopover: stop.is_stopover,
            arrival_label: format_date(stop.arrival_date()),
            departure_label: format_date(stop.departure_date()),
        }
    }
}

impl From<&Trip> for TripView {
    fn from(trip: &Trip) -> Self {
        TripView {
            id: trip.id.to_string(),
            name: trip.name.inner(),
            start_date: to_iso_string(trip.start_date()),
            end_date: to_iso_string(trip.end_date()),
            date_range: format!(
                "{} - {}",
                format_date(Some(trip.start_date())),
                format_date(Some(trip.end_date()))
            ),
            notes: trip.notes.clone(),
            travelers: trip.travelers,
            budget: trip.budget,
            stops: trip.stops.iter().map(StopView::from).collect(),
            is_public: trip.is_public,
            share_token: trip.public_token().map(|token| token.inner()),
        }
    }
}
