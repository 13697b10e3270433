use crate::cities::{City, CityId};
use chrono::NaiveDate;
use shared_kernel::date_time::calendar::{add_days, days_between};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StopError {
    #[error("{city} has no arrival date, so its nights cannot be set")]
    NoArrivalDate { city: String },
}

/// A city visit within a trip.
///
/// `nights` is cached from the two dates and recomputed on every date change,
/// so it can never drift from them.
#[derive(Clone, Debug, PartialEq)]
pub struct TripStop {
    pub city: City,
    arrival_date: Option<NaiveDate>,
    departure_date: Option<NaiveDate>,
    nights: u32,
    pub accommodation: Option<String>,
    pub notes: Option<String>,
    pub is_stopover: bool,
}

impl TripStop {
    pub fn new(city: City) -> Self {
        Self {
            city,
            arrival_date: None,
            departure_date: None,
            nights: 0,
            accommodation: None,
            notes: None,
            is_stopover: false,
        }
    }

    pub fn scheduled(city: City, arrival: NaiveDate, departure: NaiveDate) -> Self {
        let mut stop = Self::new(city);
        stop.set_dates(Some(arrival), Some(departure));
        stop
    }

    pub fn city_id(&self) -> &CityId {
        &self.city.id
    }

    pub fn arrival_date(&self) -> Option<NaiveDate> {
        self.arrival_date
    }

    pub fn departure_date(&self) -> Option<NaiveDate> {
        self.departure_date
    }

    pub fn nights(&self) -> u32 {
        self.nights
    }

    pub fn set_dates(&mut self, arrival: Option<NaiveDate>, departure: Option<NaiveDate>) {
        self.arrival_date = arrival;
        self.departure_date = departure;
        self.nights = match (arrival, departure) {
            (Some(arrival), Some(departure)) => {
                u32::try_from(days_between(arrival, departure)).unwrap_or(0)
            }
            _ => 0,
        };
    }

    pub fn set_arrival_date(&mut self, arrival: Option<NaiveDate>) {
        self.set_dates(arrival, self.departure_date);
    }

    pub fn set_departure_date(&mut self, departure: Option<NaiveDate>) {
        self.set_dates(self.arrival_date, departure);
    }

    /// Keeps the arrival and moves the departure so the stay lasts `nights`.
    pub fn set_nights(&mut self, nights: u32) -> Result<(), StopError> {
        let arrival = self.arrival_date.ok_or_else(|| StopError::NoArrivalDate {
            city: self.city.name.clone(),
        })?;
        self.set_departure_date(Some(add_days(arrival, i64::from(nights))));
        Ok(())
    }
}
