use super::{resolve_city, TripError};
use crate::cities::CityCatalog;
use chrono::NaiveDate;
use entities::cities::CityId;
use entities::trips::{Trip, TripName, TripStop};
use serde::Deserialize;
use shared_kernel::date_time::calendar::parse_date;
use shared_kernel::date_time::TimeFrame;

/// A stop as submitted by the trip form.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopForm {
    #[serde(default)]
    pub city_id: String,
    #[serde(default)]
    pub arrival_date: Option<String>,
    #[serde(default)]
    pub departure_date: Option<String>,
    /// Only used when no departure date is given.
    #[serde(default)]
    pub nights: Option<u32>,
    #[serde(default)]
    pub accommodation: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_stopover: bool,
}

/// A whole trip as submitted by the trip form, or by a client syncing its
/// locally kept trips.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripForm {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub travelers: Option<u32>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub stops: Vec<StopForm>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanTripInput {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub city_ids: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub travelers: Option<u32>,
}

/// Partial stop edit; `None` leaves a field untouched.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopEdit {
    #[serde(default)]
    pub arrival_date: Option<String>,
    #[serde(default)]
    pub departure_date: Option<String>,
    #[serde(default)]
    pub nights: Option<u32>,
    #[serde(default)]
    pub accommodation: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn parse_optional_date(value: Option<&str>) -> Result<Option<NaiveDate>, TripError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => Ok(Some(parse_date(value)?)),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

pub(crate) fn parse_trip_dates(start: &str, end: &str) -> Result<TimeFrame<NaiveDate>, TripError> {
    Ok(TimeFrame::new(parse_date(start)?, parse_date(end)?))
}

pub(crate) fn parse_trip_name(name: String) -> Result<TripName, TripError> {
    TripName::try_from(name).map_err(TripError::InvalidInput)
}

impl StopForm {
    pub fn into_stop(self, catalog: &dyn CityCatalog) -> Result<TripStop, TripError> {
        let city = resolve_city(catalog, &CityId::from(self.city_id.trim()))?;
        let arrival = parse_optional_date(self.arrival_date.as_deref())?;
        let departure = parse_optional_date(self.departure_date.as_deref())?;

        let mut stop = TripStop::new(city);
        stop.set_dates(arrival, departure);
        if let (Some(nights), Some(_), None) = (self.nights, arrival, departure) {
            stop.set_nights(nights)?;
        }
        stop.accommodation = non_blank(self.accommodation);
        stop.notes = non_blank(self.notes);
        stop.is_stopover = self.is_stopover;
        Ok(stop)
    }
}

impl TripForm {
    /// Builds a fresh trip. Stops without a city are dropped.
    pub fn into_trip(self, catalog: &dyn CityCatalog) -> Result<Trip, TripError> {
        let name = parse_trip_name(self.name)?;
        let dates = parse_trip_dates(&self.start_date, &self.end_date)?;
        let stops = self
            .stops
            .into_iter()
            .filter(|stop| !stop.city_id.trim().is_empty())
            .map(|stop| stop.into_stop(catalog))
            .collect::<Result<Vec<_>, _>>()?;

        let mut trip = Trip::new(name, dates);
        trip.notes = non_blank(self.notes);
        trip.travelers = self.travelers;
        trip.budget = self.budget;
        trip.stops = stops;
        Ok(trip)
    }

    /// Replaces `existing`'s editable fields, keeping its id and sharing state.
    pub fn replace(self, existing: &Trip, catalog: &dyn CityCatalog) -> Result<Trip, TripError> {
        let replacement = self.into_trip(catalog)?;
        Ok(Trip {
            id: existing.id,
            is_public: existing.is_public,
            share_token: existing.share_token.clone(),
            ..replacement
        })
    }
}

impl StopEdit {
    /// Dates are applied first; `nights` then moves the departure unless a
    /// departure date was given in the same edit.
    pub fn apply(self, stop: &mut TripStop) -> Result<(), TripError> {
        let arrival = parse_optional_date(self.arrival_date.as_deref())?;
        let departure = parse_optional_date(self.departure_date.as_deref())?;

        if arrival.is_some() {
            stop.set_arrival_date(arrival);
        }
        if departure.is_some() {
            stop.set_departure_date(departure);
        }
        if let (Some(nights), None) = (self.nights, departure) {
            stop.set_nights(nights)?;
        }
        if let Some(accommodation) = self.accommodation {
            stop.accommodation = non_blank(Some(accommodation));
        }
        if let Some(notes) = self.notes {
            stop.notes = non_blank(Some(notes));
        }
        Ok(())
    }
}
