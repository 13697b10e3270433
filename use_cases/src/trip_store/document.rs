//! Storage shape of a trip: plain JSON with ISO-8601 date strings.

use entities::cities::City;
use entities::trips::{ShareToken, Trip, TripId, TripName, TripStop};
use serde::{Deserialize, Serialize};
use shared_kernel::date_time::calendar::{parse_date, to_iso_string, ParseDateError};
use shared_kernel::date_time::TimeFrame;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("invalid trip id `{0}`")]
    InvalidId(String),
    #[error("invalid trip name: {0}")]
    InvalidName(String),
    #[error(transparent)]
    InvalidDate(#[from] ParseDateError),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopDocument {
    pub city: City,
    #[serde(default)]
    pub arrival_date: Option<String>,
    #[serde(default)]
    pub departure_date: Option<String>,
    /// Written for readers of the raw data; recomputed from the dates on load.
    #[serde(default)]
    pub nights: u32,
    #[serde(default)]
    pub accommodation: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_stopover: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDocument {
    pub id: String,
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
    pub stops: Vec<StopDocument>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub share_token: Option<String>,
}

impl From<&TripStop> for StopDocument {
    fn from(stop: &TripStop) -> Self {
        Self {
            city: stop.city.clone(),
            arrival_date: stop.arrival_date().map(to_iso_string),
            departure_date: stop.departure_date().map(to_iso_string),
            nights: stop.nights(),
            accommodation: stop.accommodation.clone(),
            notes: stop.notes.clone(),
            is_stopover: stop.is_stopover,
        }
    }
}

impl TryFrom<StopDocument> for TripStop {
    type Error = DocumentError;

    fn try_from(document: StopDocument) -> Result<Self, Self::Error> {
        let arrival = document.arrival_date.as_deref().map(parse_date).transpose()?;
        let departure = document
            .departure_date
            .as_deref()
            .map(parse_date)
            .transpose()?;

        let mut stop = TripStop::new(document.city);
        stop.set_dates(arrival, departure);
        stop.accommodation = document.accommodation;
        stop.notes = document.notes;
        stop.is_stopover = document.is_stopover;
        Ok(stop)
    }
}

impl From<&Trip> for TripDocument {
    fn from(trip: &Trip) -> Self {
        Self {
            id: trip.id.to_string(),
            name: trip.name.inner(),
            start_date: to_iso_string(trip.start_date()),
            end_date: to_iso_string(trip.end_date()),
            notes: trip.notes.clone(),
            travelers: trip.travelers,
            budget: trip.budget,
            stops: trip.stops.iter().map(StopDocument::from).collect(),
            is_public: trip.is_public,
            share_token: trip.share_token.as_ref().map(ShareToken::inner),
        }
    }
}

impl TryFrom<TripDocument> for Trip {
    type Error = DocumentError;

    fn try_from(document: TripDocument) -> Result<Self, Self::Error> {
        let id = document
            .id
            .parse::<TripId>()
            .map_err(|_| DocumentError::InvalidId(document.id.clone()))?;
        let name = TripName::try_from(document.name).map_err(DocumentError::InvalidName)?;
        let dates = TimeFrame::new(
            parse_date(&document.start_date)?,
            parse_date(&document.end_date)?,
        );
        let stops = document
            .stops
            .into_iter()
            .map(TripStop::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Trip {
            id,
            name,
            dates,
            notes: document.notes,
            travelers: document.travelers,
            budget: document.budget,
            stops,
            is_public: document.is_public,
            share_token: document.share_token.map(ShareToken::new),
        })
    }
}

pub fn encode_trips(trips: &[Trip]) -> anyhow::Result<String> {
    let documents = trips.iter().map(TripDocument::from).collect::<Vec<_>>();
    Ok(serde_json::to_string(&documents)?)
}

/// Decodes a stored trip list.
///
/// A blob that is not a JSON array of trips is logged and read as "no trips";
/// single documents that fail to convert are skipped with a warning.
pub fn decode_trips(blob: &str) -> Vec<Trip> {
    let documents = match serde_json::from_str::<Vec<TripDocument>>(blob) {
        Ok(documents) => documents,
        Err(err) => {
            tracing::error!("Failed to parse stored trips, treating as empty: {err}");
            return vec![];
        }
    };
    documents.into_iter().filter_map(decode_document).collect()
}

pub fn decode_document(document: TripDocument) -> Option<Trip> {
    let id = document.id.clone();
    Trip::try_from(document)
        .map_err(|err| tracing::warn!(trip = %id, "Skipping unreadable trip: {err}"))
        .ok()
}
