use super::view::TripView;
use crate::authentication::AuthenticatedUserInfo;
use crate::errors::ApiError;
use crate::use_case_app_container::UseCaseAppContainer;
use actix_web::{web, HttpRequest, HttpResponse};
use entities::cities::CityId;
use entities::trips::TripId;
use serde::Deserialize;
use serde_json::json;
use use_cases::itinerary::AddStopOutcome;
use use_cases::trips::StopEdit;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddCityRequest {
    city_id: String,
}

#[tracing::instrument(err, skip(app, req), level = "info")]
pub async fn add_city(
    trip: web::Path<TripId>,
    body: web::Json<AddCityRequest>,
    app: web::Data<UseCaseAppContainer>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user: AuthenticatedUserInfo = (&req).try_into()?;
    let city = CityId::from(body.into_inner().city_id.trim());
    let outcome = app
        .get_client()
        .trip_stops()
        .add_city(&user, trip.into_inner(), city.clone())
        .await?;

    let response = match outcome {
        AddStopOutcome::Added { .. } => HttpResponse::Ok().json(json!({ "status": "added" })),
        AddStopOutcome::Duplicate => HttpResponse::Ok().json(json!({
            "status": "duplicate",
            "message": format!("{city} is already part of this trip"),
        })),
    };
    Ok(response)
}

#[tracing::instrument(err, skip(app, req), level = "info")]
pub async fn edit_stop(
    path: web::Path<(TripId, CityId)>,
    edit: web::Json<StopEdit>,
    app: web::Data<UseCaseAppContainer>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user: AuthenticatedUserInfo = (&req).try_into()?;
    let (trip, city) = path.into_inner();
    let trip = app
        .get_client()
        .trip_stops()
        .edit_stop(&user, trip, city, edit.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "trip": TripView::from(&trip) })))
}

#[tracing::instrument(err, skip(app, req), level = "info")]
pub async fn remove_city(
    path: web::Path<(TripId, CityId)>,
    app: web::Data<UseCaseAppContainer>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user: AuthenticatedUserInfo = (&req).try_into()?;
    let (trip, city) = path.into_inner();
    let trip = app
        .get_client()
        .trip_stops()
        .remove_city(&user, trip, city)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "trip": TripView::from(&trip) })))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_app::{bearer, test_app, USER};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::NaiveDate;
    use entities::trips::{Trip, TripName};
    use entities::users::UserId;
    use serde_json::{json, Value};
    use shared_kernel::date_time::TimeFrame;
    use use_cases::trip_store::in_memory::InMemoryStore;
    use use_cases::trip_store::TripStore;

    async fn seeded_store() -> (InMemoryStore, String) {
        let trip = Trip::new(
            TripName::try_from("Rail loop").unwrap(),
            TimeFrame::new(
                NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            ),
        );
        let store = InMemoryStore::new();
        store
            .save_trips(&UserId::from(USER), &[trip.clone()])
            .await
            .unwrap();
        (store, trip.id.to_string())
    }

    #[actix_web::test]
    async fn test_cities_are_appended_one_night_at_a_time() {
        let (store, id) = seeded_store().await;
        let app = test::init_service(test_app(store)).await;

        for city in ["paris", "lyon"] {
            let req = test::TestRequest::post()
                .uri(&format!("/api/trips/{id}/stops"))
                .insert_header(bearer(USER))
                .set_json(json!({ "cityId": city }))
                .to_request();
            let response = test::call_service(&app, req).await;
            assert_eq!(response.status(), StatusCode::OK);
            let body: Value = test::read_body_json(response).await;
            assert_eq!(body["status"], "added");
        }

        let req = test::TestRequest::get()
            .uri(&format!("/api/trips/{id}"))
            .insert_header(bearer(USER))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let stops = body["trip"]["stops"].as_array().unwrap();
        assert_eq!(stops[0]["arrivalDate"], "2025-06-01");
        assert_eq!(stops[0]["departureDate"], "2025-06-02");
        assert_eq!(stops[1]["arrivalDate"], "2025-06-02");
        assert_eq!(stops[1]["departureDate"], "2025-06-03");
    }

    #[actix_web::test]
    async fn test_adding_a_city_twice_reports_a_duplicate() {
        let (store, id) = seeded_store().await;
        let app = test::init_service(test_app(store)).await;

        let mut statuses = vec![];
        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri(&format!("/api/trips/{id}/stops"))
                .insert_header(bearer(USER))
                .set_json(json!({ "cityId": "berlin" }))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            statuses.push(body["status"].as_str().unwrap().to_string());
        }

        assert_eq!(statuses, vec!["added", "duplicate"]);
    }

    #[actix_web::test]
    async fn test_stops_can_be_edited_and_removed() {
        let (store, id) = seeded_store().await;
        let app = test::init_service(test_app(store)).await;
        let req = test::TestRequest::post()
            .uri(&format!("/api/trips/{id}/stops"))
            .insert_header(bearer(USER))
            .set_json(json!({ "cityId": "paris" }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::patch()
            .uri(&format!("/api/trips/{id}/stops/paris"))
            .insert_header(bearer(USER))
            .set_json(json!({ "nights": 3, "accommodation": "Hotel du Nord" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["trip"]["stops"][0]["departureDate"], "2025-06-04");
        assert_eq!(body["trip"]["stops"][0]["accommodation"], "Hotel du Nord");

        let req = test::TestRequest::delete()
            .uri(&format!("/api/trips/{id}/stops/paris"))
            .insert_header(bearer(USER))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["trip"]["stops"].as_array().unwrap().is_empty());

        let req = test::TestRequest::delete()
            .uri(&format!("/api/trips/{id}/stops/paris"))
            .insert_header(bearer(USER))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
