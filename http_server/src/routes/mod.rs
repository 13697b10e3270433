mod authentication;
mod cities;
mod profile;
mod public;
mod trips;

#[cfg(test)]
pub(crate) mod test_app;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(authentication::init_routes)
            .configure(cities::init_routes)
            .configure(profile::init_routes)
            .configure(public::init_routes)
            .configure(trips::init_routes),
    );
}
