pub mod client;
mod profiles;
mod trips;
