//! Derives stop dates for a trip.
//!
//! Two heuristics populate the per-stop nights, each tied to one creation flow:
//! [`add_city`] appends a one-night stay after the last stop, and
//! [`distribute_stops`] spreads a whole city list across the trip span.
//! After creation, nights are edited explicitly on the stop.

mod batch;
mod incremental;

pub use batch::{distribute_stops, fits_in, stay_duration};
pub use incremental::{add_city, next_arrival, AddStopOutcome};
