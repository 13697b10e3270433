use crate::authentication::AuthConfig;
use crate::settings::{Settings, StorageBackend};
use crate::use_case_app_container::UseCaseAppContainer;
use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{http, web, App, HttpServer};
use anyhow::{anyhow, Context};
use city_catalog::JsonCityCatalog;
use shared_kernel::tracing::config_telemetry;
use sqlx_postgres::repository::Repository as PostgresRepository;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;
use use_cases::repositories::Repository;
use use_cases::trip_store::in_memory::InMemoryStore;
use use_cases::AppImpl;

mod authentication;
mod errors;
mod routes;
mod settings;
mod use_case_app_container;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config_telemetry("http_server");
    let settings = Settings::parse()?;
    let catalog = Arc::new(JsonCityCatalog::from_path(&settings.catalog.path)?);

    tracing::info!(backend = ?settings.storage.backend, "starting server");
    match settings.storage.backend {
        StorageBackend::Postgres => {
            let repository = PostgresRepository::new().await?;
            serve(settings, repository, catalog).await
        }
        StorageBackend::Redis => {
            let client = redis_client::client::CLIENT.get().await.clone();
            serve(settings, client, catalog).await
        }
        StorageBackend::Memory => serve(settings, InMemoryStore::new(), catalog).await,
    }
}

async fn serve<R: Repository + Send + 'static>(
    settings: Settings,
    repository: R,
    catalog: Arc<JsonCityCatalog>,
) -> anyhow::Result<()> {
    let governor = GovernorConfigBuilder::default()
        .per_second(settings.rate_limit.per_second)
        .burst_size(settings.rate_limit.burst_size)
        .finish()
        .ok_or_else(|| anyhow!("Invalid rate limit settings"))?;
    let auth = web::Data::new(AuthConfig::from(&settings.auth));
    let application = settings.application.clone();
    let allowed_origins = application.allowed_origins.clone();

    HttpServer::new(move || {
        let app = AppImpl::new(repository.clone(), catalog.clone());
        let app_container = UseCaseAppContainer::new(app);
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
            .allowed_headers(vec![http::header::AUTHORIZATION, http::header::CONTENT_TYPE])
            .supports_credentials();

        App::new()
            .wrap(Governor::new(&governor))
            .wrap(cors)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(app_container))
            .app_data(auth.clone())
            .configure(routes::config)
    })
    .bind((application.host.as_str(), application.port))?
    .run()
    .await
    .context("Server failed to run")
}
