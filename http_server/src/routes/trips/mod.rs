mod manage;
mod plan;
mod share;
mod stops;
mod view;

pub use view::TripView;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/trips")
            .service(
                web::resource("")
                    .route(web::get().to(manage::list_trips))
                    .route(web::post().to(manage::create_trip))
                    .route(web::put().to(manage::sync_trips)),
            )
            .route("/plan", web::post().to(plan::plan_trip))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(manage::get_trip))
                    .route(web::put().to(manage::update_trip))
                    .route(web::delete().to(manage::delete_trip)),
            )
            .route("/{id}/stops", web::post().to(stops::add_city))
            .service(
                web::resource("/{id}/stops/{city_id}")
                    .route(web::patch().to(stops::edit_stop))
                    .route(web::delete().to(stops::remove_city)),
            )
            .route("/{id}/share", web::post().to(share::share_trip)),
    );
}
