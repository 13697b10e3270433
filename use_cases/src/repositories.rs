use crate::profile::ProfileRepo;
use crate::trip_store::{PublicTripFinder, TripStore};

pub trait Repository: TripStore + PublicTripFinder + ProfileRepo + Clone {}

impl<T> Repository for T where T: Clone + TripStore + PublicTripFinder + ProfileRepo {}
