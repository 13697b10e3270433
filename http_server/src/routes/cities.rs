use crate::errors::ApiError;
use crate::use_case_app_container::UseCaseAppContainer;
use actix_web::{web, HttpResponse};
use entities::cities::CityId;
use serde::Deserialize;
use serde_json::json;
use use_cases::cities::CityQuery;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct CitiesQuery {
    country: Option<String>,
    region: Option<String>,
    min_population: Option<u64>,
    page: Option<usize>,
    limit: Option<usize>,
}

impl From<CitiesQuery> for CityQuery {
    fn from(query: CitiesQuery) -> Self {
        CityQuery {
            country: query.country,
            region: query.region,
            min_population: query.min_population.filter(|min| *min > 0),
            page: query.page,
            limit: query.limit,
        }
    }
}

async fn list_cities(
    query: web::Query<CitiesQuery>,
    app: web::Data<UseCaseAppContainer>,
) -> HttpResponse {
    let page = app.get_client().cities().list(query.into_inner().into());

    HttpResponse::Ok().json(json!({
        "cities": page.cities,
        "pagination": {
            "total": page.total,
            "page": page.page,
            "limit": page.limit,
            "totalPages": page.pages,
        }
    }))
}

async fn get_city(
    id: web::Path<String>,
    app: web::Data<UseCaseAppContainer>,
) -> Result<HttpResponse, ApiError> {
    let id = CityId::from(id.into_inner());
    let city = app
        .get_client()
        .cities()
        .get(&id)
        .ok_or_else(|| ApiError::NotFound(format!("City with ID {id} not found")))?;

    Ok(HttpResponse::Ok().json(json!({ "city": city })))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cities")
            .service(web::resource("").route(web::get().to(list_cities)))
            .service(web::resource("/{id}").route(web::get().to(get_city))),
    );
}

#[cfg(test)]
mod tests {
    use crate::routes::test_app::test_app;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::Value;
    use use_cases::trip_store::in_memory::InMemoryStore;

    #[actix_web::test]
    async fn test_cities_are_filtered_and_paginated() {
        let app = test::init_service(test_app(InMemoryStore::new())).await;

        let req = test::TestRequest::get()
            .uri("/api/cities?country=France&limit=1")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["cities"][0]["id"], "paris");
        assert_eq!(body["cities"].as_array().unwrap().len(), 1);
        assert_eq!(body["pagination"]["total"], 2);
        assert_eq!(body["pagination"]["totalPages"], 2);
    }

    #[actix_web::test]
    async fn test_cities_are_public_and_sorted_by_population() {
        let app = test::init_service(test_app(InMemoryStore::new())).await;

        let req = test::TestRequest::get().uri("/api/cities").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let ids = body["cities"]
            .as_array()
            .unwrap()
            .iter()
            .map(|city| city["id"].as_str().unwrap().to_string())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["berlin", "paris", "lyon"]);
        assert_eq!(body["pagination"]["limit"], 1000);
    }

    #[actix_web::test]
    async fn test_unknown_city_is_not_found() {
        let app = test::init_service(test_app(InMemoryStore::new())).await;

        let req = test::TestRequest::get()
            .uri("/api/cities/atlantis")
            .to_request();
        let response = test::call_service(&app, req).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
