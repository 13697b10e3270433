pub mod configuration;
mod profiles;
pub mod repository;
mod trips;
