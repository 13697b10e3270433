use chrono::NaiveDate;
use entities::trips::{Trip, TripStop};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TripValidationError {
    #[error("End date ({end}) must be after start date ({start})")]
    EndNotAfterStart { start: NaiveDate, end: NaiveDate },
    #[error("{city} needs both an arrival and a departure date")]
    MissingStopDates { city: String },
    #[error("{city} arrives on {arrival}, before the trip starts on {start}")]
    ArrivalBeforeTripStart {
        city: String,
        arrival: NaiveDate,
        start: NaiveDate,
    },
    #[error("{city} departs on {departure}, after the trip ends on {end}")]
    DepartureAfterTripEnd {
        city: String,
        departure: NaiveDate,
        end: NaiveDate,
    },
    #[error("{city} must be left after it is reached (arrival {arrival}, departure {departure})")]
    DepartureNotAfterArrival {
        city: String,
        arrival: NaiveDate,
        departure: NaiveDate,
    },
}

/// Checks the ordering rules a trip must satisfy before it is written.
pub fn validate_trip(trip: &Trip) -> Result<(), TripValidationError> {
    let (start, end) = (trip.start_date(), trip.end_date());
    if end <= start {
        return Err(TripValidationError::EndNotAfterStart { start, end });
    }

    trip.stops
        .iter()
        .try_for_each(|stop| validate_stop(stop, start, end))
}

fn validate_stop(
    stop: &TripStop,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(), TripValidationError> {
    let city = stop.city.name.clone();
    let (arrival, departure) = match (stop.arrival_date(), stop.departure_date()) {
        (Some(arrival), Some(departure)) => (arrival, departure),
        _ => return Err(TripValidationError::MissingStopDates { city }),
    };

    if arrival < start {
        return Err(TripValidationError::ArrivalBeforeTripStart {
            city,
            arrival,
            start,
        });
    }
    if departure > end {
        return Err(TripValidationError::DepartureAfterTripEnd {
            city,
            departure,
            end,
        });
    }
    if departure <= arrival {
        return Err(TripValidationError::DepartureNotAfterArrival {
            city,
            arrival,
            departure,
        });
    }
    Ok(())
}
