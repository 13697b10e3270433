use crate::authentication::AuthenticatedUserInfo;
use crate::errors::ApiError;
use crate::use_case_app_container::UseCaseAppContainer;
use actix_web::{web, HttpRequest, HttpResponse};
use entities::trips::TripId;
use entities::users::{InterrailPass, Language, TravelPreferences};
use serde::Deserialize;
use serde_json::json;
use use_cases::profile::ProfileUpdate;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ProfileRequest {
    email: Option<String>,
    home_city: Option<String>,
    travel_preferences: Option<TravelPreferences>,
    interrail_pass: Option<InterrailPass>,
    language: Option<Language>,
    notifications_enabled: Option<bool>,
}

impl From<ProfileRequest> for ProfileUpdate {
    fn from(request: ProfileRequest) -> Self {
        ProfileUpdate {
            email: request.email,
            home_city: request.home_city,
            travel_preferences: request.travel_preferences,
            interrail_pass: request.interrail_pass,
            language: request.language,
            notifications_enabled: request.notifications_enabled,
        }
    }
}

#[tracing::instrument(err, skip(app, req), level = "info")]
async fn get_profile(
    app: web::Data<UseCaseAppContainer>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user: AuthenticatedUserInfo = (&req).try_into()?;
    let profile = app.get_client().profile().get(&user).await?;

    Ok(HttpResponse::Ok().json(json!({ "user": profile })))
}

#[tracing::instrument(err, skip(app, req), level = "info")]
async fn update_profile(
    data: web::Json<ProfileRequest>,
    app: web::Data<UseCaseAppContainer>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user: AuthenticatedUserInfo = (&req).try_into()?;
    let profile = app
        .get_client()
        .profile()
        .update(&user, data.into_inner().into())
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "user": profile })))
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SavedRoute {
    route_id: TripId,
}

#[tracing::instrument(err, skip(app, req), level = "info")]
async fn list_saved_routes(
    app: web::Data<UseCaseAppContainer>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user: AuthenticatedUserInfo = (&req).try_into()?;
    let profile = app.get_client().profile().get(&user).await?;

    Ok(HttpResponse::Ok().json(json!({ "savedRoutes": profile.saved_routes })))
}

#[tracing::instrument(err, skip(app, req), level = "info")]
async fn save_route(
    body: web::Json<SavedRoute>,
    app: web::Data<UseCaseAppContainer>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user: AuthenticatedUserInfo = (&req).try_into()?;
    let saved_routes = app
        .get_client()
        .profile()
        .save_route(&user, body.route_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Route saved successfully",
        "savedRoutes": saved_routes,
    })))
}

#[tracing::instrument(err, skip(app, req), level = "info")]
async fn remove_route(
    query: web::Query<SavedRoute>,
    app: web::Data<UseCaseAppContainer>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user: AuthenticatedUserInfo = (&req).try_into()?;
    let saved_routes = app
        .get_client()
        .profile()
        .remove_route(&user, query.route_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Route removed successfully",
        "savedRoutes": saved_routes,
    })))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/user/profile")
            .route(web::get().to(get_profile))
            .route(web::put().to(update_profile)),
    )
    .service(
        web::resource("/user/saved-routes")
            .route(web::get().to(list_saved_routes))
            .route(web::post().to(save_route))
            .route(web::delete().to(remove_route)),
    );
}
