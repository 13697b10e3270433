use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry};

const DEFAULT_FILTER: &str = "info";

pub fn config_telemetry(service_name: &'static str) {
    // Needed to forward ordinary log statements to our tracing subscriber.
    tracing_log::LogTracer::init().expect("Failed to initialize log tracer");

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = Registry::default().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_thread_names(true),
    );

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to install `tracing` subscriber");

    tracing::info!(service = service_name, "telemetry configured");
}
