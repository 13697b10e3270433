use crate::authentication::AuthenticatedUserInfo;
use crate::errors::ApiError;
use crate::use_case_app_container::UseCaseAppContainer;
use actix_web::{web, HttpRequest, HttpResponse};
use entities::trips::TripId;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize, Debug)]
pub struct ShareRequest {
    public: bool,
}

#[tracing::instrument(err, skip(app, req), level = "info")]
pub async fn share_trip(
    trip: web::Path<TripId>,
    body: web::Json<ShareRequest>,
    app: web::Data<UseCaseAppContainer>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user: AuthenticatedUserInfo = (&req).try_into()?;
    let token = app
        .get_client()
        .share_trip()
        .set_public(&user, trip.into_inner(), body.public)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "shareToken": token })))
}
