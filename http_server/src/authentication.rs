use crate::errors::ApiError;
use crate::settings::AuthSettings;
use actix_web::http::header::Header;
use actix_web::{web, HttpRequest};
use actix_web_httpauth::headers::authorization;
use anyhow::{anyhow, Context};
use entities::users::{UserEmail, UserId};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use use_cases::actor::Actor;

/// Verification material for user tokens, registered as app data.
pub struct AuthConfig {
    decoding_key: DecodingKey,
    cookie_name: String,
}

impl AuthConfig {
    pub fn new(secret: &[u8], cookie_name: impl Into<String>) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            cookie_name: cookie_name.into(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }
}

impl From<&AuthSettings> for AuthConfig {
    fn from(settings: &AuthSettings) -> Self {
        Self::new(
            settings.jwt_secret.expose_secret().as_bytes(),
            settings.cookie_name.clone(),
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(
        default,
        rename = "userId",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: usize,
}

#[derive(Debug)]
pub struct AuthenticatedUserInfo {
    user_id: UserId,
    email: Option<UserEmail>,
}

fn unauthorized(err: anyhow::Error) -> ApiError {
    ApiError::Unauthorized(format!("{err:?}"))
}

fn extract_token(req: &HttpRequest, cookie_name: &str) -> Result<String, ApiError> {
    if let Ok(header) = authorization::Authorization::<authorization::Bearer>::parse(req) {
        return Ok(header.as_ref().token().to_string());
    }
    req.cookie(cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| unauthorized(anyhow!("No bearer token or `{cookie_name}` cookie")))
}

impl TryFrom<&HttpRequest> for AuthenticatedUserInfo {
    type Error = ApiError;

    fn try_from(req: &HttpRequest) -> Result<Self, Self::Error> {
        let config = req
            .app_data::<web::Data<AuthConfig>>()
            .ok_or_else(|| anyhow!("Authentication is not configured"))?;

        let token = extract_token(req, config.cookie_name())?;
        let claims = decode::<Claims>(
            &token,
            &config.decoding_key,
            &Validation::new(Algorithm::HS256),
        )
        .context("Failed to decode token")
        .map_err(unauthorized)?
        .claims;

        let user_id = claims
            .sub
            .or(claims.user_id)
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| unauthorized(anyhow!("Token has no subject")))?;
        let email = claims
            .email
            .and_then(|email| UserEmail::try_from(email).ok());

        Ok(AuthenticatedUserInfo {
            user_id: UserId::from(user_id),
            email,
        })
    }
}

impl Actor for AuthenticatedUserInfo {
    fn user_id(&self) -> UserId {
        self.user_id.clone()
    }

    fn email(&self) -> Option<UserEmail> {
        self.email.clone()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;
    use jsonwebtoken::{encode, EncodingKey, Header as JwtHeader};

    pub const SECRET: &[u8] = b"test-secret";
    pub const COOKIE: &str = "auth_token";

    pub fn auth_config() -> AuthConfig {
        AuthConfig::new(SECRET, COOKIE)
    }

    pub fn token_for(user: &str, secret: &[u8]) -> String {
        let claims = Claims {
            sub: Some(user.to_string()),
            user_id: None,
            email: Some(format!("{}@example.com", user.replace('|', "-"))),
            exp: 4_102_444_800,
        };
        encode(
            &JwtHeader::default(),
            &claims,
            &EncodingKey::from_secret(secret),
        )
        .unwrap()
    }

    #[test]
    fn test_bearer_token_is_accepted() {
        let req = TestRequest::default()
            .app_data(web::Data::new(auth_config()))
            .insert_header((
                "Authorization",
                format!("Bearer {}", token_for("auth|one", SECRET)),
            ))
            .to_http_request();

        let user = AuthenticatedUserInfo::try_from(&req).unwrap();

        assert_eq!(user.user_id(), UserId::from("auth|one"));
        assert_eq!(
            user.email().map(String::from).as_deref(),
            Some("auth-one@example.com")
        );
    }

    #[test]
    fn test_cookie_token_is_accepted() {
        let req = TestRequest::default()
            .app_data(web::Data::new(auth_config()))
            .cookie(Cookie::new(COOKIE, token_for("auth|two", SECRET)))
            .to_http_request();

        let user = AuthenticatedUserInfo::try_from(&req).unwrap();

        assert_eq!(user.user_id(), UserId::from("auth|two"));
    }

    #[test]
    fn test_legacy_user_id_claim_is_accepted() {
        let claims = Claims {
            sub: None,
            user_id: Some("legacy-user".to_string()),
            email: None,
            exp: 4_102_444_800,
        };
        let token = encode(
            &JwtHeader::default(),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        let req = TestRequest::default()
            .app_data(web::Data::new(auth_config()))
            .cookie(Cookie::new(COOKIE, token))
            .to_http_request();

        let user = AuthenticatedUserInfo::try_from(&req).unwrap();

        assert_eq!(user.user_id(), UserId::from("legacy-user"));
        assert_eq!(user.email(), None);
    }

    #[test]
    fn test_token_signed_with_another_secret_is_rejected() {
        let req = TestRequest::default()
            .app_data(web::Data::new(auth_config()))
            .cookie(Cookie::new(COOKIE, token_for("auth|one", b"other")))
            .to_http_request();

        let result = AuthenticatedUserInfo::try_from(&req);

        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let req = TestRequest::default()
            .app_data(web::Data::new(auth_config()))
            .to_http_request();

        assert!(matches!(
            AuthenticatedUserInfo::try_from(&req),
            Err(ApiError::Unauthorized(_))
        ));
    }
}
