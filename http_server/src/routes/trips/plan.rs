use super::view::TripView;
use crate::authentication::AuthenticatedUserInfo;
use crate::errors::ApiError;
use crate::use_case_app_container::UseCaseAppContainer;
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;
use use_cases::trips::PlanTripInput;

#[tracing::instrument(err, skip(app, req), level = "info")]
pub async fn plan_trip(
    input: web::Json<PlanTripInput>,
    app: web::Data<UseCaseAppContainer>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user: AuthenticatedUserInfo = (&req).try_into()?;
    let trip = app
        .get_client()
        .plan_trip()
        .plan(&user, input.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Trip planned successfully",
        "trip": TripView::from(&trip),
    })))
}
