use actix_web::{
    error,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use serde_json::json;
use thiserror::Error;
use use_cases::profile::ProfileError;
use use_cases::trips::TripError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Internal server error")]
    InternalServerError(#[from] anyhow::Error),
}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match *self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let err_json = json!({ "error": self.to_string() });
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(err_json)
    }
}

impl From<TripError> for ApiError {
    fn from(err: TripError) -> Self {
        match err {
            TripError::NotFound | TripError::StopNotFound(_) => ApiError::NotFound(err.to_string()),
            TripError::Internal(err) => ApiError::InternalServerError(err),
            TripError::UnknownCity(_)
            | TripError::Validation(_)
            | TripError::InvalidDate(_)
            | TripError::Stop(_)
            | TripError::TooManyCities { .. }
            | TripError::InvalidInput(_) => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<ProfileError> for ApiError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::NotFound => ApiError::NotFound(err.to_string()),
            ProfileError::Internal(err) => ApiError::InternalServerError(err),
            ProfileError::InvalidInput(_)
            | ProfileError::UnknownCity(_)
            | ProfileError::RouteAlreadySaved(_) => ApiError::BadRequest(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::ResponseError;
    use entities::cities::CityId;

    #[actix_web::test]
    async fn test_unauthorized_hides_the_reason() {
        let err = ApiError::Unauthorized("token expired".to_string());
        let response = err.error_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = to_bytes(response.into_body()).await.unwrap();
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(&body).unwrap(),
            json!({ "error": "Unauthorized" })
        );
    }

    #[test]
    fn test_trip_errors_map_to_statuses() {
        let cases = [
            (TripError::NotFound, StatusCode::NOT_FOUND),
            (
                TripError::UnknownCity(CityId::from("atlantis")),
                StatusCode::BAD_REQUEST,
            ),
            (
                TripError::TooManyCities {
                    cities: 4,
                    needed: 3,
                    days: 2,
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                TripError::Internal(anyhow::anyhow!("db down")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }
}
