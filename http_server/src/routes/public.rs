use crate::errors::ApiError;
use crate::routes::trips::TripView;
use crate::use_case_app_container::UseCaseAppContainer;
use actix_web::{web, HttpResponse};
use entities::trips::ShareToken;
use serde_json::json;

/// Read-only view of a shared trip. No authentication.
#[tracing::instrument(err, skip(app), level = "info")]
async fn public_trip(
    token: web::Path<ShareToken>,
    app: web::Data<UseCaseAppContainer>,
) -> Result<HttpResponse, ApiError> {
    let trip = app
        .get_client()
        .share_trip()
        .find_public(token.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "trip": TripView::from(&trip) })))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/public/trips/{token}", web::get().to(public_trip));
}

#[cfg(test)]
mod tests {
    use crate::routes::test_app::{bearer, test_app, USER};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{json, Value};
    use use_cases::trip_store::in_memory::InMemoryStore;

    #[actix_web::test]
    async fn test_shared_trip_is_readable_until_unpublished() {
        let app = test::init_service(test_app(InMemoryStore::new())).await;
        let req = test::TestRequest::post()
            .uri("/api/trips")
            .insert_header(bearer(USER))
            .set_json(json!({
                "name": "Open book",
                "startDate": "2025-06-01",
                "endDate": "2025-06-04",
                "stops": [{ "cityId": "lyon", "arrivalDate": "2025-06-01", "departureDate": "2025-06-04" }]
            }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["trip"]["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri(&format!("/api/trips/{id}/share"))
            .insert_header(bearer(USER))
            .set_json(json!({ "public": true }))
            .to_request();
        let shared: Value = test::call_and_read_body_json(&app, req).await;
        let token = shared["shareToken"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri(&format!("/api/public/trips/{token}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["trip"]["name"], "Open book");
        assert_eq!(body["trip"]["shareToken"], token.as_str());
        assert_eq!(body["trip"]["stops"][0]["city"]["name"], "Lyon");

        let req = test::TestRequest::post()
            .uri(&format!("/api/trips/{id}/share"))
            .insert_header(bearer(USER))
            .set_json(json!({ "public": false }))
            .to_request();
        let unshared: Value = test::call_and_read_body_json(&app, req).await;
        assert!(unshared["shareToken"].is_null());

        let req = test::TestRequest::get()
            .uri(&format!("/api/public/trips/{token}"))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    #[actix_web::test]
    async fn test_unknown_token_is_not_found() {
        let app = test::init_service(test_app(InMemoryStore::new())).await;

        let req = test::TestRequest::get()
            .uri("/api/public/trips/nope")
            .to_request();

        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }
}
