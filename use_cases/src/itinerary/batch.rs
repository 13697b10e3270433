use chrono::NaiveDate;
use entities::cities::City;
use entities::trips::TripStop;
use shared_kernel::date_time::calendar::{add_days, days_between};
use shared_kernel::date_time::TimeFrame;

const MIN_STAY: i64 = 1;

/// Shared length of every stay: the trip span divided by the number of transitions.
///
/// Floored, and never below one day so a stop always departs after it arrives.
pub fn stay_duration(dates: &TimeFrame<NaiveDate>, city_count: usize) -> i64 {
    let span = days_between(dates.from, dates.to);
    let transitions = i64::try_from(city_count.saturating_sub(1))
        .unwrap_or(i64::MAX)
        .max(1);
    span.div_euclid(transitions).max(MIN_STAY)
}

/// Whether `city_count` stops can share `dates` with at least one night each.
pub fn fits_in(dates: &TimeFrame<NaiveDate>, city_count: usize) -> bool {
    let transitions = i64::try_from(city_count.saturating_sub(1)).unwrap_or(i64::MAX);
    days_between(dates.from, dates.to) >= transitions
}

/// Spreads `cities` over `dates`: the first stop starts on the trip start, the last
/// ends on the trip end, and neighbours share their transition day.
pub fn distribute_stops(cities: Vec<City>, dates: &TimeFrame<NaiveDate>) -> Vec<TripStop> {
    let count = cities.len();
    let stay = stay_duration(dates, count);
    let last = count.saturating_sub(1);

    cities
        .into_iter()
        .enumerate()
        .map(|(index, city)| {
            let (arrival, departure) = if index == 0 {
                (dates.from, add_days(dates.from, stay))
            } else if index == last {
                (add_days(dates.to, -stay), dates.to)
            } else {
                let offset = i64::try_from(index).unwrap_or(i64::MAX).saturating_mul(stay);
                let arrival = add_days(dates.from, offset);
                (arrival, add_days(arrival, stay))
            };
            TripStop::scheduled(city, arrival, departure)
        })
        .collect()
}
