pub mod cities;
pub mod trips;
pub mod users;
