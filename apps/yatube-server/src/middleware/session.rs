//! Session identity: who is making the request, if anyone.

use actix_web::{
    FromRequest, HttpMessage, HttpRequest, HttpResponse, ResponseError,
    cookie::{Cookie, SameSite, time::Duration},
    dev::Payload,
    http::{StatusCode, header},
    web,
};
use std::future::{Ready, ready};
use std::sync::Arc;

use yatube_core::ports::{AuthError, TokenClaims, TokenService};
use yatube_shared::ErrorResponse;

use super::error::{AppError, AppResult};
use crate::state::AppState;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "yatube_session";

/// How sessions are started and where anonymous visitors are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub login_url: String,
    pub secure_cookies: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            login_url: "/auth/login/".to_string(),
            secure_cookies: false,
        }
    }
}

impl SessionSettings {
    pub fn session_cookie(&self, token: String, max_age_seconds: i64) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, token)
            .path("/")
            .http_only(true)
            .secure(self.secure_cookies)
            .same_site(SameSite::Lax)
            .max_age(Duration::seconds(max_age_seconds))
            .finish()
    }

    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE, "").path("/").finish();
        cookie.make_removal();
        cookie
    }
}

/// The signed-in author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: uuid::Uuid,
    pub username: String,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}

/// Resolve the principal from the session cookie or a Bearer header.
pub fn authenticate(req: &HttpRequest) -> Result<Identity, AuthError> {
    let token_service = req
        .app_data::<web::Data<Arc<dyn TokenService>>>()
        .ok_or_else(|| {
            tracing::error!("TokenService not found in app data");
            AuthError::InvalidToken("Server configuration error".to_string())
        })?;

    let token = match req.cookie(SESSION_COOKIE) {
        Some(cookie) if !cookie.value().is_empty() => cookie.value().to_string(),
        _ => req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_string)
            .ok_or(AuthError::MissingSession)?,
    };

    token_service.validate_token(&token).map(Identity::from)
}

/// Check that the token's user still exists; a stale session counts as anonymous.
///
/// The stored username wins over the one carried in the token.
pub async fn confirm(req: &HttpRequest, identity: Identity) -> AppResult<Option<Identity>> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        tracing::error!("AppState not found in app data");
        AppError::Internal("Server configuration error".to_string())
    })?;

    let user = state.users.find_by_id(identity.user_id).await?;
    if user.is_none() {
        tracing::debug!(user_id = %identity.user_id, "Session refers to an unknown user");
    }

    Ok(user.map(|user| Identity {
        user_id: user.id,
        username: user.username,
    }))
}

/// Error type for authentication failures outside the login gate.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct AuthenticationError(pub AuthError);

impl ResponseError for AuthenticationError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::new(401, "Session Expired")
                .with_detail("Your session has expired. Please sign in again."),
            AuthError::MissingSession => ErrorResponse::new(401, "Authentication Required"),
            _ => ErrorResponse::unauthorized(),
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

/// Prefers the identity stored by the login gate; otherwise checks the token itself.
impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        if let Some(identity) = req.extensions().get::<Identity>() {
            return ready(Ok(identity.clone()));
        }

        ready(authenticate(req).map_err(AuthenticationError))
    }
}
