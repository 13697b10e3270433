use super::view::TripView;
use crate::authentication::AuthenticatedUserInfo;
use crate::errors::ApiError;
use crate::use_case_app_container::UseCaseAppContainer;
use actix_web::{web, HttpRequest, HttpResponse};
use entities::trips::TripId;
use serde_json::json;
use use_cases::trips::TripForm;

#[tracing::instrument(err, skip(app, req), level = "info")]
pub async fn list_trips(
    app: web::Data<UseCaseAppContainer>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user: AuthenticatedUserInfo = (&req).try_into()?;
    let trips = app.get_client().manage_trips().list(&user).await?;

    let trips = trips.iter().map(TripView::from).collect::<Vec<_>>();
    Ok(HttpResponse::Ok().json(json!({ "trips": trips })))
}

#[tracing::instrument(err, skip(app, req, form), level = "info")]
pub async fn create_trip(
    form: web::Json<TripForm>,
    app: web::Data<UseCaseAppContainer>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user: AuthenticatedUserInfo = (&req).try_into()?;
    let trip = app
        .get_client()
        .manage_trips()
        .create(&user, form.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Trip created successfully",
        "trip": TripView::from(&trip),
    })))
}

#[tracing::instrument(err, skip(app, req, forms), level = "info")]
pub async fn sync_trips(
    forms: web::Json<Vec<TripForm>>,
    app: web::Data<UseCaseAppContainer>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user: AuthenticatedUserInfo = (&req).try_into()?;
    let results = app
        .get_client()
        .sync_trips()
        .sync(&user, forms.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Trips synced successfully",
        "results": results,
    })))
}

#[tracing::instrument(err, skip(app, req), level = "info")]
pub async fn get_trip(
    id: web::Path<TripId>,
    app: web::Data<UseCaseAppContainer>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user: AuthenticatedUserInfo = (&req).try_into()?;
    let trip = app
        .get_client()
        .manage_trips()
        .get(&user, id.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "trip": TripView::from(&trip) })))
}

#[tracing::instrument(err, skip(app, req, form), level = "info")]
pub async fn update_trip(
    id: web::Path<TripId>,
    form: web::Json<TripForm>,
    app: web::Data<UseCaseAppContainer>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user: AuthenticatedUserInfo = (&req).try_into()?;
    let trip = app
        .get_client()
        .manage_trips()
        .update(&user, id.into_inner(), form.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Trip updated successfully",
        "trip": TripView::from(&trip),
    })))
}

#[tracing::instrument(err, skip(app, req), level = "info")]
pub async fn delete_trip(
    id: web::Path<TripId>,
    app: web::Data<UseCaseAppContainer>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user: AuthenticatedUserInfo = (&req).try_into()?;
    app.get_client()
        .manage_trips()
        .delete(&user, id.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Trip deleted successfully" })))
}
