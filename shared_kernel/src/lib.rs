pub mod configuration;
pub mod date_time;
pub mod ids;
pub mod non_empty_string;
pub mod tracing;
