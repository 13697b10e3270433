use crate::authentication::tests::{auth_config, token_for, SECRET};
use crate::use_case_app_container::UseCaseAppContainer;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, Error};
use city_catalog::JsonCityCatalog;
use entities::cities::City;
use std::sync::Arc;
use use_cases::trip_store::in_memory::InMemoryStore;
use use_cases::AppImpl;

pub const USER: &str = "auth|traveller";

pub fn catalog() -> JsonCityCatalog {
    let mut paris = City::new("paris", "Paris", "France", 48.8566, 2.3522);
    paris.population = Some(2_161_000);
    paris.region = Some("Western Europe".to_string());
    let mut berlin = City::new("berlin", "Berlin", "Germany", 52.52, 13.405);
    berlin.population = Some(3_645_000);
    berlin.region = Some("Central Europe".to_string());
    let mut lyon = City::new("lyon", "Lyon", "France", 45.764, 4.8357);
    lyon.population = Some(516_000);
    lyon.region = Some("Western Europe".to_string());

    JsonCityCatalog::from_cities(vec![paris, berlin, lyon])
}

pub fn test_app(
    store: InMemoryStore,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let app = AppImpl::new(store, Arc::new(catalog()));
    App::new()
        .app_data(web::Data::new(UseCaseAppContainer::new(app)))
        .app_data(web::Data::new(auth_config()))
        .configure(super::config)
}

pub fn bearer(user: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token_for(user, SECRET)))
}
