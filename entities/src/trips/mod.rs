mod stop;

pub use stop::{StopError, TripStop};

use crate::cities::CityId;
use chrono::NaiveDate;
use shared_kernel::date_time::TimeFrame;
use shared_kernel::{non_empty_string, string_key, uuid_key};

uuid_key!(TripId);
string_key!(ShareToken);
non_empty_string!(TripName);

const SHARE_TOKEN_LENGTH: usize = 13;

impl ShareToken {
    pub fn generate() -> Self {
        let token = uuid::Uuid::new_v4().simple().to_string();
        ShareToken(token[..SHARE_TOKEN_LENGTH].to_owned())
    }
}

/// The canonical trip shape. Form input and storage documents convert to and from it.
#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    pub id: TripId,
    pub name: TripName,
    pub dates: TimeFrame<NaiveDate>,
    pub notes: Option<String>,
    pub travelers: Option<u32>,
    pub budget: Option<f64>,
    pub stops: Vec<TripStop>,
    pub is_public: bool,
    pub share_token: Option<ShareToken>,
}

impl Trip {
    pub fn new(name: TripName, dates: TimeFrame<NaiveDate>) -> Self {
        Self {
            id: TripId::new(),
            name,
            dates,
            notes: None,
            travelers: None,
            budget: None,
            stops: vec![],
            is_public: false,
            share_token: None,
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.dates.from
    }

    pub fn end_date(&self) -> NaiveDate {
        self.dates.to
    }

    pub fn contains_city(&self, city: &CityId) -> bool {
        self.stops.iter().any(|stop| stop.city_id() == city)
    }

    pub fn stop_mut(&mut self, city: &CityId) -> Option<&mut TripStop> {
        self.stops.iter_mut().find(|stop| stop.city_id() == city)
    }

    pub fn remove_city(&mut self, city: &CityId) -> Option<TripStop> {
        let index = self.stops.iter().position(|stop| stop.city_id() == city)?;
        Some(self.stops.remove(index))
    }

    /// Makes the trip reachable through its share token, generating the token once.
    pub fn publish(&mut self) -> ShareToken {
        self.is_public = true;
        self.share_token
            .get_or_insert_with(ShareToken::generate)
            .clone()
    }

    pub fn unpublish(&mut self) {
        self.is_public = false;
    }

    pub fn public_token(&self) -> Option<&ShareToken> {
        self.share_token.as_ref().filter(|_| self.is_public)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cities::City;

    fn trip() -> Trip {
        let dates = TimeFrame::new(
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
        );
        Trip::new(TripName::try_from("Summer loop").unwrap(), dates)
    }

    #[test]
    fn test_trip_name_cannot_be_blank() {
        assert!(TripName::try_from("   ".to_string()).is_err());
        assert_eq!(
            TripName::try_from("  Alps  ".to_string()).unwrap().inner(),
            "Alps"
        );
    }

    #[test]
    fn test_share_token_is_generated_once() {
        let mut trip = trip();
        assert!(trip.public_token().is_none());

        let first = trip.publish();
        assert_eq!(first.as_str().len(), SHARE_TOKEN_LENGTH);
        assert!(first.as_str().chars().all(|c| c.is_ascii_alphanumeric()));

        trip.unpublish();
        assert!(trip.public_token().is_none());

        let second = trip.publish();
        assert_eq!(first, second);
    }

    #[test]
    fn test_removing_a_city_keeps_the_order_of_the_rest() {
        let mut trip = trip();
        for id in ["paris", "lyon", "nice"] {
            trip.stops
                .push(TripStop::new(City::new(id, id, "France", 0.0, 0.0)));
        }
        let removed = trip.remove_city(&CityId::from("lyon"));
        assert!(removed.is_some());
        let remaining = trip
            .stops
            .iter()
            .map(|stop| stop.city_id().as_str())
            .collect::<Vec<_>>();
        assert_eq!(remaining, vec!["paris", "nice"]);
        assert!(trip.remove_city(&CityId::from("lyon")).is_none());
    }
}
