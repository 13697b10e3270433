use crate::authentication::{AuthConfig, AuthenticatedUserInfo};
use crate::errors::ApiError;
use crate::use_case_app_container::UseCaseAppContainer;
use actix_web::cookie::Cookie;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize, Debug, Default)]
struct AuthenticationRequest {
    /// Falls back to the token's e-mail claim.
    #[serde(default)]
    email: Option<String>,
}

#[tracing::instrument(err, skip(app, req), level = "info")]
async fn authenticate(
    data: Option<web::Json<AuthenticationRequest>>,
    app: web::Data<UseCaseAppContainer>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user: AuthenticatedUserInfo = (&req).try_into()?;
    let email = data.and_then(|data| data.into_inner().email);

    let profile = app
        .get_client()
        .profile()
        .authenticate(&user, email)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "user": profile })))
}

async fn logout(config: web::Data<AuthConfig>) -> HttpResponse {
    let mut cookie = Cookie::new(config.cookie_name().to_owned(), "");
    cookie.set_path("/");
    cookie.make_removal();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(json!({ "message": "Logged out successfully" }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/authenticate").route(web::post().to(authenticate)))
        .service(web::resource("/auth/logout").route(web::post().to(logout)));
}
